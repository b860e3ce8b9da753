//! Runtime configuration.
//!
//! Missing files fall back to defaults so a fresh cabinet boots without any
//! setup; a file that exists but does not parse is an error.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, Level};

pub const APP_DIR: &str = "cabinet-input";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Who advances the hardware abstraction each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateStrategy {
    /// The session runs its own poll loop.
    #[default]
    Manual,
    /// The host calls `Session::poll_once` from its own frame loop.
    External,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Poll loop period; 16ms is one frame at 60Hz.
    pub frame_interval_ms: u64,
    pub update_strategy: UpdateStrategy,
    /// Stick readings below this magnitude count as centered.
    pub axis_deadzone: f32,
    /// Honor the fullscreen/quit/inspector keys.
    pub debug_keys: bool,
    pub log_level: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            update_strategy: UpdateStrategy::Manual,
            axis_deadzone: 0.05,
            debug_keys: true,
            log_level: "info".to_string(),
        }
    }
}

impl InputConfig {
    /// `$CONFIG_DIR/cabinet-input/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Loads from the default location, or defaults if there is none.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(io_error)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Never shorter than 1ms.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    /// Falls back to INFO on an unknown level name.
    pub fn level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("{}-{}-{}", APP_DIR, name, std::process::id()))
            .join(CONFIG_FILE)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = InputConfig::load_from(&scratch("missing")).unwrap();
        assert_eq!(config, InputConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config: InputConfig =
            toml::from_str("update_strategy = \"external\"\ndebug_keys = false\n").unwrap();
        assert_eq!(config.update_strategy, UpdateStrategy::External);
        assert!(!config.debug_keys);
        assert_eq!(config.frame_interval_ms, 16);
    }

    #[test]
    fn saved_config_loads_back() {
        let path = scratch("roundtrip");
        let config = InputConfig {
            frame_interval_ms: 8,
            log_level: "debug".to_string(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(InputConfig::load_from(&path).unwrap(), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = scratch("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "frame_interval_ms = \"fast\"").unwrap();
        assert!(matches!(
            InputConfig::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn level_and_interval_fall_back() {
        let config = InputConfig {
            frame_interval_ms: 0,
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(1));
        assert_eq!(config.level(), Level::INFO);
    }
}
