use crate::config::GameConfig;
use crate::input::Steering;

use super::background::Background;
use super::score::ScoreBoard;
use super::sim::Simulation;

/// Which screen the game is on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Title,
    Playing,
    GameOver,
}

/// Player intent for one frame, already resolved from raw keys.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub quit: bool,
    pub confirm: bool,
    pub restart: bool,
    pub steering: Steering,
}

/// Side effects requested by a frame.  The caller turns them into sound
/// and process exit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameEvents {
    pub quit: bool,
    pub play_intro: bool,
    pub play_points: bool,
    pub play_boom: bool,
}

/// All mutable game state.
pub struct Session {
    phase: Phase,
    pub sim: Simulation,
    pub score: ScoreBoard,
    pub background: Background,
}

impl Session {
    pub fn new(config: &GameConfig, sim: Simulation, high_score: u32) -> Self {
        Self {
            phase: Phase::Title,
            background: Background::new(
                config.screen_width as i32,
                config.screen_height as i32,
                config.background_velocity,
            ),
            score: ScoreBoard::new(high_score, config.points_interval_ms),
            sim,
        }
    }

    pub fn phase(&self) -> Phase { self.phase }

    /// High score to write on exit, `None` while no round was ever played.
    pub fn high_score_to_persist(&self) -> Option<u32> {
        (self.phase != Phase::Title).then(|| self.score.high_score())
    }

    /// Run one frame of game logic.
    ///
    /// `intro_playing` reports whether the round-start cue is still sounding;
    /// while it is, the round is frozen and scores nothing.
    pub fn frame(&mut self, now_ms: u64, delta_ms: u64, input: &FrameInput, intro_playing: bool) -> FrameEvents {
        let mut events = FrameEvents::default();
        if input.quit {
            events.quit = true;
            return events;
        }

        match self.phase {
            Phase::Title => {
                if input.confirm {
                    self.start_round(now_ms);
                    events.play_intro = true;
                }
                return events;
            }
            Phase::Playing | Phase::GameOver if input.restart => {
                self.start_round(now_ms);
                events.play_intro = true;
            }
            _ => {}
        }
        let intro_playing = intro_playing || events.play_intro;

        self.sim.set_steering(input.steering);
        match self.phase {
            Phase::Playing => {
                if intro_playing {
                    self.score.hold(now_ms);
                } else {
                    events.play_points = self.score.accrue(delta_ms);
                    self.sim.step(delta_ms);
                    self.background.advance(delta_ms);
                }
                self.score.update(now_ms);

                if let Some(hit) = self.sim.detect_collision() {
                    log::debug!("ship hit asteroid {hit}");
                    log::info!("game over, score {}", self.score.score());
                    self.phase = Phase::GameOver;
                    events.play_boom = true;
                }
            }
            Phase::GameOver => self.background.advance(delta_ms),
            Phase::Title => {}
        }
        events
    }

    fn start_round(&mut self, now_ms: u64) {
        log::info!("round started");
        self.sim.reset();
        self.score.begin_round(now_ms);
        self.phase = Phase::Playing;
    }
}
