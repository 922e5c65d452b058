pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod window;

/// Window title.
pub const GAME_TITLE: &str = "Space Dodge";
