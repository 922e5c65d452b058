use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use crate::audio::AudioContext;
use crate::error::EngineError;
use crate::input::InputState;
use crate::renderer::Renderer;
use crate::renderer::canvas::Canvas;
use crate::window::{WindowConfig, window_attributes};

// ── Color ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
    pub const TRANSPARENT: Self = Self([0.0, 0.0, 0.0, 0.0]);
}

// ── Game trait ──────────────────────────────────────────────────────────────

pub trait Game {
    fn update(&mut self, engine: &mut Engine);
    fn render(&mut self, engine: &mut Engine);
    /// Called once when the event loop is about to stop, with the renderer
    /// and audio still alive.
    fn on_exit(&mut self, _engine: &mut Engine) {}
}

// ── Engine ──────────────────────────────────────────────────────────────────

pub struct Engine {
    /// GPU renderer: surface, sprite pipeline and texture arena.
    pub renderer: Renderer,
    /// Draw queue for the current frame; cleared by the game each render.
    pub canvas: Canvas,
    pub input: InputState,
    pub audio: AudioContext,
    started: Instant,
    ticks_ms: u64,
    delta_ms: u64,
    pub(crate) quit_requested: bool,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    fn new(renderer: Renderer, audio: AudioContext) -> Self {
        Self {
            renderer,
            canvas: Canvas::new(),
            input: InputState::new(),
            audio,
            started: Instant::now(),
            ticks_ms: 0,
            delta_ms: 0,
            quit_requested: false,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    /// Milliseconds since the engine started, sampled once per frame.
    pub fn ticks_ms(&self) -> u64 { self.ticks_ms }
    /// Milliseconds between the previous frame and this one.
    pub fn delta_ms(&self) -> u64 { self.delta_ms }

    /// Signal that the application should exit.  The event loop will call
    /// `exit()` after the current update completes.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    fn advance_clock(&mut self) {
        let now = self.started.elapsed().as_millis() as u64;
        self.delta_ms = now.saturating_sub(self.ticks_ms);
        self.ticks_ms = now;
    }
}

// ── EngineBuilder ───────────────────────────────────────────────────────────

pub struct EngineBuilder {
    title: String,
    window: WindowConfig,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self {
            title: crate::GAME_TITLE.into(),
            window: WindowConfig::default(),
        }
    }
}

impl EngineBuilder {
    /// Logical resolution and the integer factor the window is scaled by.
    pub fn with_resolution(mut self, width: u32, height: u32, scale: u32) -> Self {
        self.window = WindowConfig::scaled(width, height, scale);
        self
    }

    /// Open the window, then build the game with `setup` once the renderer
    /// and audio device exist, and run it until it quits.
    ///
    /// Any error from window, GPU or audio creation, or from `setup`, stops
    /// the loop and is returned.
    pub fn run<G, F>(self, setup: F) -> Result<(), EngineError>
    where
        G: Game,
        F: FnOnce(&mut Engine) -> Result<G, EngineError>,
    {
        let event_loop = EventLoop::new()?;
        let mut app = App {
            config: self,
            setup: Some(setup),
            game: None,
            engine: None,
            error: None,
        };
        event_loop.run_app(&mut app)?;

        match app.error {
            Some(e) => Err(e),
            None if app.setup.is_some() => Err(EngineError::NotStarted),
            None => Ok(()),
        }
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

struct App<G, F> {
    config: EngineBuilder,
    setup: Option<F>,
    game: Option<G>,
    engine: Option<Engine>,
    error: Option<EngineError>,
}

impl<G, F> App<G, F>
where
    G: Game,
    F: FnOnce(&mut Engine) -> Result<G, EngineError>,
{
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<(), EngineError> {
        let Some(setup) = self.setup.take() else { return Ok(()) };

        let window = Arc::new(
            event_loop.create_window(window_attributes(&self.config.title, &self.config.window))?,
        );
        let renderer = pollster::block_on(Renderer::new(window, self.config.window.clone()))?;
        let audio = AudioContext::new()?;

        let mut engine = Engine::new(renderer, audio);
        let game = setup(&mut engine)?;
        log::info!("started '{}'", self.config.title);

        engine.renderer.window.request_redraw();
        self.game = Some(game);
        self.engine = Some(engine);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if let (Some(game), Some(engine)) = (self.game.as_mut(), self.engine.as_mut()) {
            game.on_exit(engine);
        }
        self.game = None;
        event_loop.exit();
    }
}

impl<G, F> ApplicationHandler for App<G, F>
where
    G: Game,
    F: FnOnce(&mut Engine) -> Result<G, EngineError>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(e) = self.start(event_loop) {
            log::error!("startup failed: {e}");
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = self.engine.as_ref() {
            engine.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let (Some(engine), Some(game)) = (self.engine.as_mut(), self.game.as_mut()) else { return };

        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(size) => engine.renderer.resize(size),

            WindowEvent::Focused(false) => engine.input.release_all(),

            WindowEvent::RedrawRequested => {
                engine.advance_clock();

                game.update(engine);
                if engine.quit_requested {
                    self.shutdown(event_loop);
                    return;
                }

                game.render(engine);
                match engine.renderer.render(&engine.canvas) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        log::warn!("surface lost, reconfiguring");
                        engine.renderer.reconfigure();
                    }
                    Err(e) => log::error!("render error: {e}"),
                }

                // End of frame cleanup
                engine.input.clear_frame_state();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => engine.input.press(code),
                ElementState::Released => engine.input.release(code),
            },

            _ => {}
        }
    }
}
