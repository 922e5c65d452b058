// =============================================================================
// GEOMETRY.RS — Integer screen-space primitives
//
// Everything on screen is addressed in logical pixels:
// - Point: a cursor or origin
// - Rect: tile regions, draw destinations, collision boxes
// =============================================================================

/// A logical-pixel coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle with its top-left corner at `(x, y)`.
///
/// Width and height are signed so that degenerate rectangles (zero or
/// negative extent) can be represented and rejected by the queries below.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// The all-zero rectangle returned for out-of-range lookups.
    pub const ZERO: Self = Self { x: 0, y: 0, w: 0, h: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// True when the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true when both rectangles have positive extents and share a
    /// region of positive area.
    ///
    /// Rectangles that only touch along an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
