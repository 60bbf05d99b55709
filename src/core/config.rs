// Configuration Management
// Loads and validates the JSON configuration file (conf.json by default).

use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Application configuration.
///
/// Key names match the configuration file verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "TRADE_PAIRS", default)]
    pub trade_pairs: Vec<String>,

    #[serde(rename = "SOCKET_ADDRESS", default)]
    pub socket_address: String,

    #[serde(rename = "WINDOW", default)]
    pub window: usize,

    #[serde(rename = "CLEAR_CONSOLE", default)]
    pub clear_console: bool,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)?;
        info!(path = %path.as_ref().display(), "Configuration loaded");
        Ok(config)
    }

    /// Validate required fields. Any missing/zero value is a startup error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trade_pairs.is_empty() {
            return Err(ConfigError::Validation(
                "No TRADE_PAIRS in configuration".to_string(),
            ));
        }
        if self.socket_address.is_empty() {
            return Err(ConfigError::Validation(
                "No SOCKET_ADDRESS in configuration".to_string(),
            ));
        }
        if self.window == 0 {
            return Err(ConfigError::Validation(
                "No WINDOW in configuration".to_string(),
            ));
        }
        Ok(())
    }
}
