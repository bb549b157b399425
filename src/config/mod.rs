//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::reader::StorageOrder;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Log input configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Column holding the event text
    #[serde(default = "default_entry_column")]
    pub entry_column: String,

    /// Row order of the stored log
    #[serde(default)]
    pub order: StorageOrder,
}

fn default_entry_column() -> String {
    "entry".to_string()
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            entry_column: default_entry_column(),
            order: StorageOrder::default(),
        }
    }
}

/// Engine tuning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many recent lines of the current hand are searched for a pot
    /// collection when a player shows down.
    #[serde(default = "default_showdown_window")]
    pub showdown_window: usize,
}

fn default_showdown_window() -> usize {
    5
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            showdown_window: default_showdown_window(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Largest accepted upload, in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub reader: ReaderConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            reader: ReaderConfig::default(),
            analysis: AnalysisConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reader.entry_column.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Entry column name must not be empty".to_string(),
            ));
        }

        if self.analysis.showdown_window == 0 {
            return Err(ConfigError::ValidationError(
                "Showdown window must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "Upload limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
