// ── WindowConfig ──────────────────────────────────────────────────────────────

/// Window configuration snapshot.
///
/// - **physical** dimensions are the actual pixel size of the OS window
///   (accounts for HiDPI scaling and user resizes).
/// - **logical** dimensions are the internal game resolution every draw
///   command is expressed in (240 × 320 for Space Dodge).
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// Actual window width in physical pixels.
    pub physical_width: u32,
    /// Actual window height in physical pixels.
    pub physical_height: u32,
    /// Internal game / render resolution width.
    pub logical_width: u32,
    /// Internal game / render resolution height.
    pub logical_height: u32,
}

impl WindowConfig {
    /// A window `scale` times larger than the logical resolution.
    /// A scale of zero is treated as one.
    pub fn scaled(logical_width: u32, logical_height: u32, scale: u32) -> Self {
        let scale = scale.max(1);
        Self {
            physical_width: logical_width * scale,
            physical_height: logical_height * scale,
            logical_width,
            logical_height,
        }
    }

    /// Aspect ratio of the **logical** resolution (`logical_width / logical_height`).
    ///
    /// Returns `0.0` when `logical_height` is zero to avoid division by zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.logical_height == 0 {
            return 0.0;
        }
        self.logical_width as f32 / self.logical_height as f32
    }
}

impl Default for WindowConfig {
    /// 240 × 320 logical resolution shown at 2×.
    fn default() -> Self {
        Self::scaled(240, 320, 2)
    }
}
