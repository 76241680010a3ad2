//! Session settings
//!
//! Board size, enemy roster and tick period for one session. Read from a
//! JSON file on native, from LocalStorage in the browser; anything missing
//! falls back to the defaults in [`crate::consts`].

use std::fmt;
use std::time::Duration;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Why settings could not be loaded or used
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The JSON did not describe a `Settings`
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read settings '{path}': {source}"),
            Self::Parse(err) => write!(f, "malformed settings: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Enemies spawned at setup; clearing them all wins the level
    pub enemy_count: usize,
    /// Enemy energy is drawn from `[min, min + max)`
    pub min_enemy_energy: f32,
    pub max_enemy_energy: f32,

    pub board_width: f32,
    pub board_height: f32,
    /// Tick period in milliseconds
    pub tick_ms: u64,

    pub player_energy: f32,
    pub player_start: (f32, f32),
    /// Distance of one manual move
    pub player_step: f32,

    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enemy_count: ENEMY_COUNT,
            min_enemy_energy: MIN_ENEMY_ENERGY,
            max_enemy_energy: MAX_ENEMY_ENERGY,

            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            tick_ms: TICK_MS,

            player_energy: PLAYER_ENERGY,
            player_start: PLAYER_START,
            player_step: PLAYER_STEP,

            seed: None,
        }
    }
}

impl Settings {
    #[inline]
    pub fn board_size(&self) -> Vec2 {
        Vec2::new(self.board_width, self.board_height)
    }

    #[inline]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Reject values the simulation cannot run with
    ///
    /// Zero enemies is allowed: the level clears on the first tick.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |field, reason| Err(SettingsError::Invalid { field, reason });

        if !(self.board_width > 0.0) {
            return invalid("board_width", "must be positive");
        }
        if !(self.board_height > 0.0) {
            return invalid("board_height", "must be positive");
        }
        if self.tick_ms == 0 {
            return invalid("tick_ms", "must be at least 1");
        }
        if !(self.min_enemy_energy >= MIN_SPAWN_ENEMY_ENERGY) {
            return invalid("min_enemy_energy", "must be at least 6 (radius floor(e/6) >= 1)");
        }
        if !(self.max_enemy_energy > 0.0) {
            return invalid("max_enemy_energy", "must be positive");
        }
        if !(self.player_energy >= MIN_SPAWN_PLAYER_ENERGY) {
            return invalid("player_energy", "must be at least 4 (radius floor(e/4) >= 1)");
        }
        if !(self.player_step > 0.0) {
            return invalid("player_step", "must be positive");
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Settings file picked up from the working directory
    #[cfg(not(target_arch = "wasm32"))]
    const SETTINGS_FILE: &'static str = "ball_bounce_settings.json";

    /// Load settings from the working directory, or defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::path::Path::new(Self::SETTINGS_FILE);
        if path.exists() {
            match Self::load_from(path) {
                Ok(settings) => return settings,
                Err(err) => log::warn!("Ignoring {}: {err}", path.display()),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "ball_bounce_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(err) => log::warn!("Ignoring stored settings: {err}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.board_size(), Vec2::new(500.0, 500.0));
        assert_eq!(settings.tick_period(), Duration::from_millis(30));
        assert_eq!(settings.enemy_count, 10);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "enemy_count": 3, "seed": 7 }"#).unwrap();
        assert_eq!(settings.enemy_count, 3);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.board_width, BOARD_WIDTH);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            enemy_count: 4,
            seed: Some(99),
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Settings::from_json(r#"{ "tick_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "tick_ms", .. }));

        let err = Settings::from_json(r#"{ "board_width": -1.0 }"#).unwrap_err();
        assert!(err.to_string().contains("board_width"));

        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_energies_that_spawn_zero_radius() {
        let settings = Settings {
            min_enemy_energy: 0.0,
            max_enemy_energy: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid {
                field: "min_enemy_energy",
                ..
            })
        ));

        let settings = Settings {
            min_enemy_energy: 5.9,
            ..Default::default()
        };
        assert!(settings.validate().is_err());

        let settings = Settings {
            min_enemy_energy: 6.0,
            max_enemy_energy: 1.0,
            ..Default::default()
        };
        assert!(settings.validate().is_ok());

        let settings = Settings {
            player_energy: 3.0,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::Invalid {
                field: "player_energy",
                ..
            })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_missing_file_reports_path() {
        let err = Settings::load_from("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
