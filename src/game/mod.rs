//! Space Dodge: steer a ship along the bottom of the screen and avoid the
//! asteroids raining down for as long as possible.
//!
//! Everything here except [`SpaceDodge`] is plain state with no GPU or audio
//! dependency, so the whole frame logic runs under `cargo test`.

pub mod actors;
pub mod background;
pub mod score;
pub mod session;
pub mod sim;

use std::path::Path;

use crate::config::GameConfig;
use crate::engine::{Color, Engine, Game};
use crate::error::EngineError;
use crate::geometry::{Point, Rect};
use crate::input::{ActionMap, KeyCode, Steering};
use crate::renderer::TextureId;
use crate::renderer::font::GlyphRenderer;
use crate::renderer::tilegrid::TileGrid;

use score::HighScoreFile;
use session::{FrameEvents, FrameInput, Phase, Session};
use sim::Simulation;

/// Edge of one ship sprite cell.
pub const SHIP_TILE: u32 = 16;

pub const INTRO_SOUND: &str = "intro";
pub const POINTS_SOUND: &str = "points";
pub const BOOM_SOUND: &str = "boom";

const TITLE_PROMPT: &str = "PRESS ENTER TO PLAY";

// ── Actions ──────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Confirm,
    Restart,
    Quit,
}

/// The fixed key layout.
pub fn default_actions() -> ActionMap<Action> {
    ActionMap::new()
        .bind(Action::Left, KeyCode::ArrowLeft)
        .bind(Action::Right, KeyCode::ArrowRight)
        .bind(Action::Confirm, KeyCode::Enter)
        .bind(Action::Confirm, KeyCode::NumpadEnter)
        .bind(Action::Restart, KeyCode::KeyR)
        .bind(Action::Quit, KeyCode::Escape)
}

// ── Static images ────────────────────────────────────────────────────────────

/// A whole-texture image and where it is drawn.
struct Picture {
    texture: TextureId,
    dst: Rect,
}

impl Picture {
    /// Load `path` scaled by `scale`, centred horizontally with its vertical
    /// centre at `cy`.
    fn load(engine: &mut Engine, path: &Path, screen_w: i32, cy: i32, scale: u32) -> Result<Self, EngineError> {
        let texture = engine.renderer.load_image(path)?;
        let size = engine.renderer.texture_size(texture).unwrap_or((0, 0));
        Ok(Self { texture, dst: centred_banner(screen_w, cy, size, scale) })
    }
}

/// `w × h` scaled by `scale` and centred horizontally on the screen, with
/// its vertical centre at `cy`.
fn centred_banner(screen_w: i32, cy: i32, (w, h): (u32, u32), scale: u32) -> Rect {
    let w = (w * scale) as i32;
    let h = (h * scale) as i32;
    Rect::new(screen_w / 2 - w / 2, cy - h / 2, w, h)
}

// ── SpaceDodge ───────────────────────────────────────────────────────────────

pub struct SpaceDodge {
    config: GameConfig,
    actions: ActionMap<Action>,
    session: Session,
    high_scores: HighScoreFile,
    font: GlyphRenderer,
    ship: TileGrid,
    background: TextureId,
    title: Picture,
    game_over: Picture,
}

impl SpaceDodge {
    /// Load every asset and the stored high score.  Any missing asset is
    /// fatal.
    pub fn load(engine: &mut Engine, config: GameConfig) -> Result<Self, EngineError> {
        let assets = &config.assets;
        engine.audio.load_sound(INTRO_SOUND, &assets.intro_sound)?;
        engine.audio.load_sound(POINTS_SOUND, &assets.points_sound)?;
        engine.audio.load_sound(BOOM_SOUND, &assets.boom_sound)?;

        let font = GlyphRenderer::load(&mut engine.renderer, &assets.font, config.font_scale)?;
        let ship = engine.renderer.load_tile_grid(&assets.ship, SHIP_TILE, SHIP_TILE, false)?;
        let background = engine.renderer.load_image(&assets.background)?;

        let screen_w = config.screen_width as i32;
        let screen_h = config.screen_height as i32;
        let title = Picture::load(engine, &assets.title, screen_w, screen_h / 3, config.title_scale)?;
        let game_over = Picture::load(engine, &assets.game_over, screen_w, screen_h / 2, config.game_over_scale)?;

        let high_scores = HighScoreFile::new(config.high_score_path.clone());
        let sim = Simulation::new(&config, ship.tile_width() as i32, ship.tile_height() as i32);
        let session = Session::new(&config, sim, high_scores.load());

        Ok(Self {
            actions: default_actions(),
            session,
            high_scores,
            font,
            ship,
            background,
            title,
            game_over,
            config,
        })
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    fn read_input(&self, engine: &Engine) -> FrameInput {
        let input = &engine.input;
        FrameInput {
            quit: self.actions.is_pressed(Action::Quit, input),
            confirm: self.actions.is_pressed(Action::Confirm, input),
            restart: self.actions.is_pressed(Action::Restart, input),
            steering: Steering::new(
                self.actions.is_held(Action::Left, input),
                self.actions.is_held(Action::Right, input),
            ),
        }
    }

    fn play_cues(engine: &mut Engine, events: &FrameEvents) {
        if events.play_intro {
            engine.audio.play_tracked(INTRO_SOUND);
        }
        if events.play_points {
            engine.audio.play(POINTS_SOUND);
        }
        if events.play_boom {
            engine.audio.play(BOOM_SOUND);
        }
    }

    // ── Drawing ────────────────────────────────────────────────────────────

    fn draw_background(&self, engine: &mut Engine) {
        for dst in self.session.background.copies() {
            engine.canvas.draw_image(self.background, dst);
        }
    }

    fn draw_scores(&self, engine: &mut Engine) {
        let score = &self.session.score;
        let high_origin = Point::new(self.config.screen_width as i32 - 80, 0);
        self.font.render_fmt(&mut engine.canvas, None, format_args!("SCORE\n{}", score.score()));
        self.font.render_fmt(
            &mut engine.canvas,
            Some(high_origin),
            format_args!("HIGH SCORE\n{:010}", score.high_score()),
        );
    }

    fn draw_title(&self, engine: &mut Engine) {
        engine.canvas.draw_image(self.title.texture, self.title.dst);
        let origin = Point::new(
            self.config.screen_width as i32 / 2 - TITLE_PROMPT.len() as i32 * 4,
            self.config.screen_height as i32 / 2,
        );
        self.font.render(&mut engine.canvas, TITLE_PROMPT, Some(origin));
    }

    fn draw_field(&self, engine: &mut Engine) {
        let sim = &self.session.sim;
        engine.canvas.draw_tile(&self.ship, 0, sim.ship_rect());
        for a in &sim.asteroids {
            engine.canvas.fill_rect(a.rect(), Color::WHITE);
        }
    }
}

impl Game for SpaceDodge {
    fn update(&mut self, engine: &mut Engine) {
        let input = self.read_input(engine);
        let intro_playing = engine.audio.is_playing(INTRO_SOUND);
        let before = self.session.phase();

        let events = self.session.frame(engine.ticks_ms(), engine.delta_ms(), &input, intro_playing);
        Self::play_cues(engine, &events);

        if self.session.phase() != before {
            log::info!("{before:?} -> {:?}", self.session.phase());
        }
        if events.quit {
            engine.request_quit();
        }
    }

    fn render(&mut self, engine: &mut Engine) {
        engine.canvas.clear(Color::BLACK);
        match self.session.phase() {
            Phase::Title => self.draw_title(engine),
            Phase::Playing => {
                self.draw_background(engine);
                self.draw_scores(engine);
                self.draw_field(engine);
            }
            Phase::GameOver => {
                self.draw_background(engine);
                engine.canvas.draw_image(self.game_over.texture, self.game_over.dst);
                self.draw_scores(engine);
            }
        }
    }

    fn on_exit(&mut self, engine: &mut Engine) {
        if let Some(high) = self.session.high_score_to_persist() {
            self.high_scores.persist(high);
        }

        self.font.release(&mut engine.renderer);
        engine.renderer.release_tile_grid(&mut self.ship);
        for texture in [self.background, self.title.texture, self.game_over.texture] {
            engine.renderer.release_texture(Some(texture));
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    #[test]
    fn banner_is_centred() {
        assert_eq!(centred_banner(240, 106, (60, 20), 3), Rect::new(30, 76, 180, 60));
    }

    #[test]
    fn default_bindings() {
        let actions = default_actions();
        let mut input = InputState::new();
        input.press(KeyCode::NumpadEnter);
        assert!(actions.is_pressed(Action::Confirm, &input));
        assert!(!actions.is_pressed(Action::Restart, &input));
    }
}
