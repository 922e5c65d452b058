use crate::geometry::Rect;

/// Vertically scrolling backdrop drawn as two stacked screen-sized copies.
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    offset: f32,
    velocity: f32,
    width: i32,
    height: i32,
}

impl Background {
    pub fn new(width: i32, height: i32, velocity: f32) -> Self {
        Self { offset: 0.0, velocity, width, height }
    }

    pub fn offset(&self) -> f32 { self.offset }

    /// Scroll down for `elapsed_ms`, wrapping at the screen height.
    pub fn advance(&mut self, elapsed_ms: u64) {
        if self.height <= 0 {
            return;
        }
        self.offset += self.velocity * (elapsed_ms as f32 / 1000.0);
        self.offset = self.offset.rem_euclid(self.height as f32);
    }

    /// Destinations of the upper and lower copy.
    pub fn copies(&self) -> [Rect; 2] {
        let pos = self.offset as i32;
        [
            Rect::new(0, pos - self.height, self.width, self.height),
            Rect::new(0, pos, self.width, self.height),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_wraps_at_screen_height() {
        let mut bg = Background::new(240, 320, 100.0);
        bg.advance(3_500);
        assert_eq!(bg.offset(), 30.0);
        assert_eq!(bg.copies()[0], Rect::new(0, -290, 240, 320));
        assert_eq!(bg.copies()[1], Rect::new(0, 30, 240, 320));
    }
}
