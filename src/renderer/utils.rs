// ── Viewport math ─────────────────────────────────────────────────────────────
//
// The game draws into a fixed logical resolution.  The viewport maps that
// resolution onto the physical window: whole-number upscales whenever the
// window is at least as large as the logical screen (crisp pixels), a
// fractional downscale otherwise, centred on both axes.

use crate::window::WindowConfig;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Rectangle in physical pixels the logical screen is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const EMPTY: Self = Self { x: 0.0, y: 0.0, width: 0.0, height: 0.0 };

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Upscale factor for `config`: the largest whole number that fits, or the
/// exact fractional fit when the window is smaller than the logical screen.
pub fn pixel_scale(config: &WindowConfig) -> f32 {
    if config.logical_width == 0 || config.logical_height == 0 {
        return 0.0;
    }
    let fit = (config.physical_width as f32 / config.logical_width as f32)
        .min(config.physical_height as f32 / config.logical_height as f32);
    if fit >= 1.0 { fit.floor() } else { fit }
}

/// Centred viewport for `config`, scaled by [`pixel_scale`].
///
/// Returns [`Viewport::EMPTY`] when either logical dimension is zero.
pub fn letterbox_viewport(config: &WindowConfig) -> Viewport {
    let scale = pixel_scale(config);
    if scale == 0.0 {
        return Viewport::EMPTY;
    }

    let width = config.logical_width as f32 * scale;
    let height = config.logical_height as f32 * scale;
    Viewport {
        x: ((config.physical_width as f32 - width) / 2.0).floor(),
        y: ((config.physical_height as f32 - height) / 2.0).floor(),
        width,
        height,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
