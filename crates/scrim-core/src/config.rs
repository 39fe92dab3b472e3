//! Configuration for scrim
//!
//! Settings for the team API connection and editor timing. Loaded from
//! `<config dir>/scrim/config.toml`, with `SCRIM_API_URL` and
//! `SCRIM_API_TOKEN` overriding the file.
//!
//! ```toml
//! [api]
//! base_url = "https://play.example.org/api"
//! token = "..."
//! timeout_secs = 30
//!
//! [editor]
//! save_status_revert_ms = 2000
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding `api.base_url`
pub const ENV_API_URL: &str = "SCRIM_API_URL";
/// Environment variable overriding `api.token`
pub const ENV_API_TOKEN: &str = "SCRIM_API_TOKEN";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrimConfig {
    /// Team API connection
    pub api: ApiConfig,
    /// Team editor behavior
    pub editor: EditorConfig,
}

/// Team API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the team API; `None` selects the in-memory demo backend
    pub base_url: Option<String>,
    /// Bearer token forwarded on every request
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent sent on every request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: 30,
            user_agent: format!("scrim/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Team editor settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// How long a save result stays visible before reverting to idle
    pub save_status_revert_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            save_status_revert_ms: 2000,
        }
    }
}

impl EditorConfig {
    pub fn save_status_revert(&self) -> Duration {
        Duration::from_millis(self.save_status_revert_ms)
    }
}

impl ScrimConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scrim").join("config.toml"))
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a file; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e.to_string())),
        }
    }

    /// Load from the default location, apply environment overrides and validate
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api.base_url = Some(url);
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.is_empty()) {
            self.api.token = Some(token);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.api.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "api.timeout_secs must be positive".to_string(),
            ));
        }

        if self.editor.save_status_revert_ms == 0 {
            return Err(ConfigError::OutOfRange(
                "editor.save_status_revert_ms must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration loading and validation errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),

    /// Base URL is not an http(s) URL
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),
}
