//! Run settings
//!
//! Loaded from a JSON file. Missing fields fall back to their defaults, so a
//! settings file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Viewport;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Run settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Simulation ===
    /// Seed for every random decision in the run
    pub seed: u64,
    /// Level to start on
    pub start_level: u32,
    /// Lives at the start of the run
    pub lives: u32,
    /// Visible area (pixels)
    pub view_width: f64,
    pub view_height: f64,

    // === Runner ===
    /// Simulation rate (ticks per second)
    pub tick_rate: u32,
    /// Stop a headless run after this many ticks (0 = no limit)
    pub max_ticks: u64,
    /// Pace ticks in real time instead of running flat out
    pub realtime: bool,

    // === Audio ===
    /// Drop sound events instead of playing them
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            start_level: START_LEVEL,
            lives: START_LIVES,
            view_width: VIEW_WIDTH,
            view_height: VIEW_HEIGHT,

            tick_rate: TICKS_PER_SECOND,
            // Ten minutes of play
            max_ticks: TICKS_PER_SECOND as u64 * 600,
            realtime: false,

            muted: false,
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.view_width, self.view_height)
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        match Self::load(path) {
            Err(SettingsError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "seed": 42, "lives": 5 }"#).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.lives, 5);
        assert_eq!(settings.tick_rate, TICKS_PER_SECOND);
        assert_eq!(settings.viewport(), Viewport::default());
    }

    #[test]
    fn test_bad_json_is_a_parse_error() {
        let path = std::env::temp_dir().join("haunted_road_bad_settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse(_))));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("haunted_road_no_such_settings.json");
        let settings = Settings::load_or_default(&path).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(matches!(Settings::load(&path), Err(SettingsError::Io(_))));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join("haunted_road_saved_settings.json");
        let settings = Settings {
            seed: 7,
            start_level: 4,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_tick_dt() {
        let settings = Settings::default();
        assert!((settings.tick_dt() - 0.05).abs() < 1e-12);
    }
}
