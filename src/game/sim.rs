use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::input::Steering;

use super::actors::{Asteroid, Ship};

/// Ship and asteroid field, advanced by wall-clock milliseconds.
pub struct Simulation {
    width: i32,
    height: i32,
    ship_velocity: f32,
    asteroid_accel: f32,
    ship_top: i32,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    rng: StdRng,
}

impl Simulation {
    /// A field seeded from OS entropy.
    pub fn new(config: &GameConfig, ship_w: i32, ship_h: i32) -> Self {
        Self::with_rng(config, ship_w, ship_h, StdRng::from_entropy())
    }

    /// A reproducible field.
    pub fn with_seed(config: &GameConfig, ship_w: i32, ship_h: i32, seed: u64) -> Self {
        Self::with_rng(config, ship_w, ship_h, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &GameConfig, ship_w: i32, ship_h: i32, rng: StdRng) -> Self {
        let width = config.screen_width as i32;
        let height = config.screen_height as i32;
        let mut sim = Self {
            width,
            height,
            ship_velocity: config.ship_velocity,
            asteroid_accel: config.asteroid_accel,
            ship_top: height - config.ship_baseline,
            ship: Ship::new(ship_w, ship_h),
            asteroids: Vec::with_capacity(config.asteroid_count),
            rng,
        };
        sim.asteroids.resize_with(config.asteroid_count, || Asteroid {
            pos: glam::Vec2::ZERO,
            velocity: 0.0,
            size: 0,
        });
        sim.reset();
        sim
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    /// Start a new round: ship centred and still, every asteroid respawned.
    pub fn reset(&mut self) {
        self.ship.reset(self.width);
        for a in &mut self.asteroids {
            *a = Asteroid::spawn(&mut self.rng, self.width, self.height);
        }
    }

    pub fn set_steering(&mut self, steering: Steering) {
        self.ship.steering = steering;
    }

    /// Advance everything by `elapsed_ms`.  Asteroids that fell past the
    /// bottom edge are recycled above the top.
    pub fn step(&mut self, elapsed_ms: u64) {
        let dt = elapsed_ms as f32 / 1000.0;
        self.ship.advance(dt, self.ship_velocity, self.width);
        for a in &mut self.asteroids {
            a.advance(dt, self.asteroid_accel);
            if a.is_below(self.height) {
                a.recycle(&mut self.rng, self.width);
            }
        }
    }

    pub fn ship_rect(&self) -> Rect {
        self.ship.rect(self.ship_top)
    }

    /// Index of the first asteroid overlapping the ship, if any.
    pub fn detect_collision(&self) -> Option<usize> {
        let ship = self.ship_rect();
        self.asteroids.iter().position(|a| ship.intersects(&a.rect()))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_fills_the_configured_field() {
        let cfg = GameConfig::default();
        let sim = Simulation::with_seed(&cfg, 16, 16, 3);
        assert_eq!(sim.asteroids.len(), 15);
        assert_eq!(sim.ship.position, 120.0);
        assert_eq!(sim.ship_rect(), Rect::new(120, 295, 16, 16));
    }
}
