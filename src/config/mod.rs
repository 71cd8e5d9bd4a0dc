//! # Phone Book Configuration
//!
//! Layered configuration built with the `config` crate:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`config/phonebook.toml` unless told otherwise)
//! 3. Environment variables prefixed with `PHONEBOOK_`, nested with `__`
//!    (`PHONEBOOK_DATABASE__URL`, `PHONEBOOK_LOGGING__JSON`, ...)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use phonebook_core::config::PhoneBookConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PhoneBookConfig::load()?;
//! println!("database: {}", config.database.url);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::{detect_environment, DEFAULT_CONFIG_PATH, ENV_PREFIX};

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneBookConfig {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the SQLite store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `sqlite://` URL of the database file
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// How long a statement waits on a locked database before failing
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://phonebook.db".to_string(),
            max_connections: 5,
            acquire_timeout_seconds: 30,
            busy_timeout_ms: 5000,
        }
    }
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_seconds)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

/// Logging settings; `level` takes `EnvFilter` directives
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

impl PhoneBookConfig {
    /// Reject values that would only fail later, at connect time or worse
    pub fn validate(&self) -> ConfigResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "database.url",
                &self.database.url,
                "must not be empty",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigurationError::invalid_value(
                "database.max_connections",
                self.database.max_connections,
                "must be at least 1",
            ));
        }

        if let Some(level) = &self.logging.level {
            if let Err(e) = EnvFilter::try_new(level) {
                return Err(ConfigurationError::invalid_value(
                    "logging.level",
                    level,
                    e.to_string(),
                ));
            }
        }

        Ok(())
    }
}
