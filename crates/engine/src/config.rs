//! System configuration read once at startup.
//!
//! ```json
//! { "title": "Tetris", "width": 288, "height": 408 }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::DisplaySize;

/// Environment variable overriding the configuration path.
pub const CONFIG_PATH_ENV: &str = "SCENE_TETRIS_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "conf/system.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub title: String,
    pub width: i32,
    pub height: i32,
}

impl SystemConfig {
    /// Load from `$SCENE_TETRIS_CONFIG`, falling back to `conf/system.json`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(&path)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SystemConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "display size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn display(&self) -> DisplaySize {
        DisplaySize::new(self.width, self.height)
    }
}
