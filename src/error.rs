use std::path::PathBuf;

/// Failure to load one of the game's asset files.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    /// The image could not be opened or decoded.
    #[error("failed to load image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Tile dimensions of zero cannot index a sheet.
    #[error("invalid tile size {tile_w}x{tile_h} for '{path}'")]
    TileSize { path: PathBuf, tile_w: u32, tile_h: u32 },

    /// The sound file could not be read or decoded.
    #[error("failed to load sound '{name}' from '{path}': {source}")]
    Sound {
        name: String,
        path: PathBuf,
        #[source]
        source: kira::sound::FromFileError,
    },
}

/// Fatal startup and runtime errors raised by the engine.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("surface creation failed: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture format")]
    SurfaceFormat,

    #[error("audio initialisation failed: {0}")]
    Audio(String),

    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The event loop stopped before the game was ever started.
    #[error("the window was closed before the game could start")]
    NotStarted,
}

/// Errors reading the optional tuning file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
