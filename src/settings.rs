//! Startup settings
//!
//! Read once from a JSON file before the world is built. Missing keys fall
//! back to defaults, so a file only needs the values it overrides.

use std::fmt;
use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ASTEROID_POOL_SIZE, BASE_FPS, PICKUP_POOL_SIZE};

/// Window and frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
    pub fps: u32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            fps: 60,
            vsync: true,
        }
    }
}

impl WindowSettings {
    /// Visible extent, used as the world's culling viewport
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Step scale for one frame at the target rate
    pub fn frame_dt(&self) -> f32 {
        BASE_FPS / self.fps.max(1) as f32
    }
}

/// Asset paths, passed through untouched to the audio/render layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    pub theme_bgm_path: String,
    pub pickup_sfx_path: String,
    pub collision_sfx_path: String,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            theme_bgm_path: "assets/audio/theme.ogg".to_string(),
            pickup_sfx_path: "assets/audio/pickup.wav".to_string(),
            collision_sfx_path: "assets/audio/collision.wav".to_string(),
        }
    }
}

/// World construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// RNG seed; equal seeds give equal worlds
    pub seed: u64,
    /// Asteroid pool capacity
    pub asteroid_pool: usize,
    /// Pickup pool capacity
    pub pickup_pool: usize,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            asteroid_pool: ASTEROID_POOL_SIZE,
            pickup_pool: PICKUP_POOL_SIZE,
        }
    }
}

/// All startup settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub resources: ResourceSettings,
    pub world: WorldSettings,
}

/// Settings file could not be read or written
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "settings file error: {e}"),
            Self::Parse(e) => write!(f, "settings parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults if the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "window": { "width": 800 }, "world": { "seed": 7 } }"#)
            .unwrap();
        assert_eq!(s.window.width, 800.0);
        assert_eq!(s.window.height, 720.0);
        assert_eq!(s.world.seed, 7);
        assert_eq!(s.world.asteroid_pool, ASTEROID_POOL_SIZE);
        assert_eq!(s.resources, ResourceSettings::default());
    }

    #[test]
    fn test_bad_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("settings parse error"));
    }

    #[test]
    fn test_round_trip_file() {
        let path = std::env::temp_dir().join(format!("drift-field-settings-{}.json", std::process::id()));
        let mut s = Settings::default();
        s.world.pickup_pool = 3;
        s.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), s);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let s = Settings::load_or_default("/nonexistent/drift-field.json");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_frame_dt() {
        let mut w = WindowSettings::default();
        assert_eq!(w.frame_dt(), 1.0);
        w.fps = 120;
        assert_eq!(w.frame_dt(), 0.5);
        assert_eq!(w.viewport(), Vec2::new(1280.0, 720.0));
    }
}
