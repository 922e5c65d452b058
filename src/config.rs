//! Game tuning values.
//!
//! Every field has a default matching the shipped game; a `spacedodge.json`
//! file may override any subset of them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// File name probed in the working directory at startup.
pub const CONFIG_FILE: &str = "spacedodge.json";

/// Paths of every asset the game loads at startup.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetPaths {
    pub font: PathBuf,
    pub ship: PathBuf,
    pub background: PathBuf,
    pub title: PathBuf,
    pub game_over: PathBuf,
    pub intro_sound: PathBuf,
    pub points_sound: PathBuf,
    pub boom_sound: PathBuf,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            font: "Images/font.bmp".into(),
            ship: "Images/ship.bmp".into(),
            background: "Images/space.bmp".into(),
            title: "Images/title.bmp".into(),
            game_over: "Images/game.bmp".into(),
            intro_sound: "Music/Sounds/intro.wav".into(),
            points_sound: "Music/Sounds/points.wav".into(),
            boom_sound: "Music/Sounds/boom.wav".into(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Logical screen width in pixels.
    pub screen_width: u32,
    /// Logical screen height in pixels.
    pub screen_height: u32,
    /// Integer upscale from logical to physical window size.
    pub window_scale: u32,
    pub asteroid_count: usize,
    /// Horizontal ship speed in px/s at full deflection.
    pub ship_velocity: f32,
    /// Asteroid fall-speed gain in px/s².
    pub asteroid_accel: f32,
    /// Background scroll speed in px/s.
    pub background_velocity: f32,
    /// Distance from the bottom of the screen to the ship's top edge.
    pub ship_baseline: i32,
    /// Milliseconds of scoring play between two points cues.
    pub points_interval_ms: u64,
    pub font_scale: u32,
    pub title_scale: u32,
    pub game_over_scale: u32,
    pub high_score_path: PathBuf,
    pub assets: AssetPaths,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 240,
            screen_height: 320,
            window_scale: 2,
            asteroid_count: 15,
            ship_velocity: 130.0,
            asteroid_accel: 2.0,
            background_velocity: 100.0,
            ship_baseline: 25,
            points_interval_ms: 10_000,
            font_scale: 1,
            title_scale: 3,
            game_over_scale: 2,
            high_score_path: "scores".into(),
            assets: AssetPaths::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read `path` if it exists, otherwise return the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Like [`GameConfig::load`], but a broken file only costs a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = GameConfig::from_json(r#"{ "asteroid_count": 3, "assets": { "font": "f.bmp" } }"#).unwrap();
        assert_eq!(cfg.asteroid_count, 3);
        assert_eq!(cfg.screen_width, 240);
        assert_eq!(cfg.assets.font, PathBuf::from("f.bmp"));
        assert_eq!(cfg.assets.ship, PathBuf::from("Images/ship.bmp"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(GameConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = GameConfig::load(Path::new("definitely/not/here.json")).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }
}
