//! Configuration management for roomdesk
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::transport::ClientConfig;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Platform API configuration
    pub api: ApiConfig,

    /// Status poller configuration
    pub poller: PollerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Platform API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Platform base URL
    pub base_url: String,

    /// Bearer token (optional)
    pub token: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retry count for failed reads
    pub retry_count: u32,

    /// Delay between read retries in milliseconds
    pub retry_delay_ms: u64,
}

/// Status poller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Seconds between polls
    pub interval_secs: u64,

    /// Recent log entries fetched per room per poll
    pub window: u32,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8080"),
            token: None,
            request_timeout_secs: 30,
            retry_count: 2,
            retry_delay_ms: 500,
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            window: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            poller: PollerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url = std::env::var("ROOMDESK_API_URL").unwrap_or(defaults.api.base_url);

        let token = std::env::var("ROOMDESK_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());

        let request_timeout_secs = env_parse("ROOMDESK_REQUEST_TIMEOUT")?
            .unwrap_or(defaults.api.request_timeout_secs);

        let retry_count = env_parse("ROOMDESK_RETRY_COUNT")?.unwrap_or(defaults.api.retry_count);

        let interval_secs =
            env_parse("ROOMDESK_POLL_INTERVAL")?.unwrap_or(defaults.poller.interval_secs);

        let level = std::env::var("ROOMDESK_LOG_LEVEL").unwrap_or(defaults.logging.level);

        let format = std::env::var("ROOMDESK_LOG_FORMAT").unwrap_or(defaults.logging.format);

        let config = Self {
            api: ApiConfig {
                base_url,
                token,
                request_timeout_secs,
                retry_count,
                retry_delay_ms: defaults.api.retry_delay_ms,
            },
            poller: PollerConfig {
                interval_secs,
                window: defaults.poller.window,
            },
            logging: LoggingConfig { level, format },
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        url::Url::parse(&self.api.base_url).map_err(|e| ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            reason: e.to_string(),
        })?;

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.request_timeout_secs".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.poller.interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poller.interval_secs".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.poller.window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "poller.window".to_string(),
                reason: "Must fetch at least 1 entry".to_string(),
            });
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format".to_string(),
                reason: format!("Unsupported format: {}", self.logging.format),
            });
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poller.interval_secs)
    }

    /// Transport configuration derived from the API section
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api.base_url.clone())
            .with_timeout(self.request_timeout())
            .with_retry_count(self.api.retry_count)
            .with_retry_delay(Duration::from_millis(self.api.retry_delay_ms));

        match &self.api.token {
            Some(token) => config.with_token(token.clone()),
            None => config,
        }
    }
}

fn env_parse<T>(key: &str) -> std::result::Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                reason: format!("{value:?}: {e}"),
            }),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },
}
