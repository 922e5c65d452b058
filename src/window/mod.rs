pub mod config;

pub use config::WindowConfig;

use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowAttributes};

/// Window attributes for a fixed-size, non-resizable game window sized to
/// `config.physical_width × physical_height`.
pub fn window_attributes(title: &str, config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(title)
        .with_inner_size(PhysicalSize::new(config.physical_width, config.physical_height))
        .with_resizable(false)
}

/// Refresh the physical size in `config` after the OS resized the window.
/// Zero-sized (minimised) windows leave the config untouched.
pub fn track_resize(config: &mut WindowConfig, size: PhysicalSize<u32>) {
    if size.width == 0 || size.height == 0 {
        return;
    }
    config.physical_width = size.width;
    config.physical_height = size.height;
}
