//! Game configuration.
//!
//! Loaded once at startup, optionally from a JSON file. Any field the file
//! leaves out keeps its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tactica_physics::{ConfigError, MovementConfig};
use thiserror::Error;

use crate::input::KeyBindings;

/// Errors from loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum GameConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid movement config: {0}")]
    Movement(#[from] ConfigError),

    #[error("tick rate must be between 1 and 1000, got {0}")]
    TickRate(u32),

    #[error("mouse sensitivity must be positive and finite, got {0}")]
    Sensitivity(f32),
}

/// Top-level configuration for a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Radians of yaw/pitch per pointer pixel.
    pub mouse_sensitivity: f32,

    /// Movement physics configuration.
    pub movement: MovementConfig,

    /// Key bindings.
    pub bindings: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            mouse_sensitivity: 0.002,
            movement: MovementConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, GameConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GameConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| GameConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameConfigError> {
        if !(1..=1000).contains(&self.tick_rate) {
            return Err(GameConfigError::TickRate(self.tick_rate));
        }
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            return Err(GameConfigError::Sensitivity(self.mouse_sensitivity));
        }
        self.movement.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.delta_time() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "tick_rate": 128 }"#).unwrap();

        assert_eq!(config.tick_rate, 128);
        assert_eq!(config.mouse_sensitivity, 0.002);
        assert_eq!(config.bindings, KeyBindings::default());
        assert_eq!(config.movement.walk_speed, MovementConfig::default().walk_speed);
    }

    #[test]
    fn test_nested_overrides() {
        let json = r#"{
            "movement": { "walk_speed": 5.0 },
            "bindings": { "jump": ["j"] }
        }"#;
        let config = GameConfig::from_json_str(json).unwrap();

        assert_eq!(config.movement.walk_speed, 5.0);
        assert_eq!(config.bindings.jump, vec!["j".to_string()]);
        assert_eq!(config.bindings.forward, vec!["w".to_string()]);
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let result = GameConfig::from_json_str(r#"{ "tick_rate": 0 }"#);
        assert!(matches!(result, Err(GameConfigError::TickRate(0))));
    }

    #[test]
    fn test_rejects_bad_sensitivity() {
        let result = GameConfig::from_json_str(r#"{ "mouse_sensitivity": -1.0 }"#);
        assert!(matches!(result, Err(GameConfigError::Sensitivity(_))));
    }

    #[test]
    fn test_movement_errors_are_wrapped() {
        let result = GameConfig::from_json_str(r#"{ "movement": { "gravity": 0.0 } }"#);
        assert!(matches!(result, Err(GameConfigError::Movement(_))));
    }

    #[test]
    fn test_parse_error() {
        let result = GameConfig::from_json_str("tick_rate = 60");
        assert!(matches!(result, Err(GameConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = GameConfig::load("/nonexistent/tactica.json");
        assert!(matches!(result, Err(GameConfigError::Io { .. })));
    }
}
