use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Which record stores the application talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Remote store first, local cache as fallback. Local only if no database is configured.
    #[default]
    Auto,
    /// Only the local JSON cache.
    Local,
    /// Only the remote database.
    Remote,
}

/// Contains parameters for where trades and cash moves are persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub mode: StorageMode,
    /// The JSON file used as the local store / fallback cache.
    #[serde(default = "default_local_path")]
    pub local_path: PathBuf,
    /// PostgreSQL URL of the remote store. Falls back to `DATABASE_URL` when unset.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection before giving up on the remote store.
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            mode: StorageMode::default(),
            local_path: default_local_path(),
            database_url: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

/// Contains parameters for the tracing subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is not set (e.g. "info", "analytics=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional directory for daily-rolling log files, in addition to stderr.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}

fn default_local_path() -> PathBuf {
    PathBuf::from("tradelog.json")
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Rejects settings that would only fail later, deep inside a store or the logger.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.local_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "storage.local_path must not be empty".to_string(),
            ));
        }
        if self.storage.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "storage.max_connections must be greater than zero".to_string(),
            ));
        }
        if self.storage.mode == StorageMode::Remote && self.storage.database_url.is_none() {
            return Err(ConfigError::ValidationError(
                "storage.mode = \"remote\" requires storage.database_url or DATABASE_URL".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
