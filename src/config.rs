//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::endpoints::{DEFAULT_ASSISTANT_URL, DEFAULT_BILLING_URL, DEFAULT_LIMITS_URL};
use crate::api::Endpoints;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub user: UserConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_limits_url")]
    pub limits_url: String,

    #[serde(default = "default_billing_url")]
    pub billing_url: String,

    #[serde(default = "default_assistant_url")]
    pub assistant_url: String,

    /// Unset means requests may hang forever
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_limits_url() -> String {
    DEFAULT_LIMITS_URL.to_string()
}

fn default_billing_url() -> String {
    DEFAULT_BILLING_URL.to_string()
}

fn default_assistant_url() -> String {
    DEFAULT_ASSISTANT_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            limits_url: default_limits_url(),
            billing_url: default_billing_url(),
            assistant_url: default_assistant_url(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(&self.limits_url, &self.billing_url, &self.assistant_url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Identity sent with every request
#[derive(Debug, Clone, Deserialize)]
pub struct UserConfig {
    #[serde(default = "default_user_id")]
    pub id: u64,
}

fn default_user_id() -> u64 {
    1
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            id: default_user_id(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("painel").join("config.toml")),
            Some(PathBuf::from("./painel.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any `PAINEL_*` variable source
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PAINEL_LIMITS_URL") {
            self.api.limits_url = url;
        }
        if let Some(url) = lookup("PAINEL_BILLING_URL") {
            self.api.billing_url = url;
        }
        if let Some(url) = lookup("PAINEL_ASSISTANT_URL") {
            self.api.assistant_url = url;
        }
        if let Some(secs) = lookup("PAINEL_REQUEST_TIMEOUT_SECS") {
            match secs.parse() {
                Ok(secs) => self.api.request_timeout_secs = Some(secs),
                Err(_) => tracing::warn!("Ignoring invalid PAINEL_REQUEST_TIMEOUT_SECS: {}", secs),
            }
        }

        if let Some(id) = lookup("PAINEL_USER_ID") {
            match id.parse() {
                Ok(id) => self.user.id = id,
                Err(_) => tracing::warn!("Ignoring invalid PAINEL_USER_ID: {}", id),
            }
        }

        if let Some(level) = lookup("PAINEL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("PAINEL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Painel Configuration
#
# Environment variables override these settings:
# - PAINEL_LIMITS_URL
# - PAINEL_BILLING_URL
# - PAINEL_ASSISTANT_URL
# - PAINEL_REQUEST_TIMEOUT_SECS
# - PAINEL_USER_ID
# - PAINEL_LOG_LEVEL
# - PAINEL_LOG_FORMAT

[api]
# Limits service (revenue summary)
limits_url = "http://localhost:8003"

# Billing service (plan and usage)
billing_url = "http://localhost:8005"

# Assistant service (chat)
assistant_url = "http://localhost:8004"

# Request timeout in seconds (unset: wait indefinitely)
# request_timeout_secs = 30

[user]
# User the dashboard is shown for
id = 1

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
