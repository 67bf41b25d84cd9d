//! Configuration handling for the fileshelf CLI
//!
//! Configuration is read from `config.toml` in the platform config
//! directory (e.g. `~/.config/fileshelf/config.toml`) or from the path given
//! with `--config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logger::Level;

/// Data directory used when neither flag nor config names one
pub const DEFAULT_ROOT: &str = "./database";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Default database root directory
    pub root: Option<PathBuf>,

    /// Minimum log level (trace, debug, info, warn, error, fatal)
    pub log_level: Option<String>,
}

impl Config {
    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "fileshelf", "fileshelf").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads configuration from an explicit path, or the global location
    ///
    /// A missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::global_config_dir() {
                Some(dir) => dir.join("config.toml"),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parses and validates configuration text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.level()?;
        Ok(config)
    }

    /// Returns the configured log level, defaulting to info
    pub fn level(&self) -> Result<Level, ConfigError> {
        match &self.log_level {
            Some(raw) => raw.parse().map_err(ConfigError::Invalid),
            None => Ok(Level::Info),
        }
    }

    /// Picks the database root: explicit flag, then config, then the default
    pub fn root_or(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.root.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT))
    }
}
