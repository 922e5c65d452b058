use glam::Vec2;
use rand::Rng;

use crate::geometry::Rect;
use crate::input::Steering;

/// Smallest asteroid edge in pixels.
pub const MIN_ASTEROID_SIZE: i32 = 5;
/// Number of distinct sizes above the minimum (sizes are 5..=9).
pub const ASTEROID_SIZE_SPREAD: i32 = 5;
/// Lower bound of the initial fall speed, px/s.
pub const MIN_ASTEROID_VELOCITY: f32 = 50.0;
/// Upper bound (exclusive) of the initial fall speed, px/s.
pub const MAX_ASTEROID_VELOCITY: f32 = 150.0;

// ── Ship ─────────────────────────────────────────────────────────────────────

/// The player's ship.  It only moves horizontally along a fixed baseline.
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    /// Left edge in logical pixels.
    pub position: f32,
    pub steering: Steering,
    pub width: i32,
    pub height: i32,
}

impl Ship {
    pub fn new(width: i32, height: i32) -> Self {
        Self { position: 0.0, steering: Steering::default(), width, height }
    }

    /// Centre-ish start: left edge at half the screen width, no steering.
    pub fn reset(&mut self, screen_width: i32) {
        self.steering = Steering::default();
        self.position = (screen_width / 2) as f32;
    }

    /// Move by `velocity` px/s in the steered direction for `dt` seconds and
    /// keep the sprite fully on screen.
    pub fn advance(&mut self, dt: f32, velocity: f32, screen_width: i32) {
        self.position += self.steering.direction() as f32 * velocity * dt;
        let max = (screen_width - self.width).max(0) as f32;
        self.position = self.position.clamp(0.0, max);
    }

    /// Collision box with its top edge at `top`.
    pub fn rect(&self, top: i32) -> Rect {
        Rect::new(self.position as i32, top, self.width, self.height)
    }
}

// ── Asteroid ─────────────────────────────────────────────────────────────────

/// A falling square rock.  Size is fixed at spawn; the fall speed only grows.
#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Fall speed in px/s.
    pub velocity: f32,
    pub size: i32,
}

impl Asteroid {
    /// A fresh rock somewhere above the top edge, at most one screen height
    /// up, with a random size, speed and column.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, screen_width: i32, screen_height: i32) -> Self {
        let velocity = rng.gen_range(MIN_ASTEROID_VELOCITY..MAX_ASTEROID_VELOCITY);
        let size = MIN_ASTEROID_SIZE + rng.gen_range(0..ASTEROID_SIZE_SPREAD);
        let x = random_column(rng, screen_width, size);
        let y = -rng.gen_range(1..=screen_height.max(1)) - size;
        Self { pos: Vec2::new(x as f32, y as f32), velocity, size }
    }

    /// Fall for `dt` seconds, then speed up by `accel * dt`.
    pub fn advance(&mut self, dt: f32, accel: f32) {
        self.pos.y += self.velocity * dt;
        self.velocity += accel * dt;
    }

    /// True once the rock has dropped past the bottom edge.
    pub fn is_below(&self, screen_height: i32) -> bool {
        self.pos.y > screen_height as f32
    }

    /// Put the rock back just above the top edge in a new column.  Size and
    /// speed carry over.
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R, screen_width: i32) {
        self.pos.y = -self.size as f32;
        self.pos.x = random_column(rng, screen_width, self.size) as f32;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x as i32, self.pos.y as i32, self.size, self.size)
    }
}

/// Random left edge in `[0, screen_width - size)`, or 0 when the rock is as
/// wide as the screen.
fn random_column<R: Rng + ?Sized>(rng: &mut R, screen_width: i32, size: i32) -> i32 {
    let span = screen_width - size;
    if span <= 0 { 0 } else { rng.gen_range(0..span) }
}

// ── Tests ────────────────────────────────────────────────────────────────────
