//! Configuration Loader
//!
//! Assembles defaults, the TOML file and `PHONEBOOK_*` environment variables,
//! then validates the result.

use super::error::ConfigResult;
use super::PhoneBookConfig;
use config::{Config, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Configuration file read by [`PhoneBookConfig::load`]
pub const DEFAULT_CONFIG_PATH: &str = "config/phonebook.toml";

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PHONEBOOK";

/// Detect the deployment environment from the usual variables
pub fn detect_environment() -> String {
    std::env::var("PHONEBOOK_ENV")
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

impl PhoneBookConfig {
    /// Load from [`DEFAULT_CONFIG_PATH`] (if present) and the process environment
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load from a specific file (if present) and the process environment
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        Self::build(Some(path), None)
    }

    /// Load with an explicit environment map instead of the process
    /// environment; tests use this to avoid mutating global state
    pub fn load_with_env(
        path: Option<&Path>,
        env: HashMap<String, String>,
    ) -> ConfigResult<Self> {
        Self::build(path, Some(env))
    }

    fn build(path: Option<&Path>, env: Option<HashMap<String, String>>) -> ConfigResult<Self> {
        let defaults = PhoneBookConfig::default();

        let mut builder = Config::builder()
            .set_default("database.url", defaults.database.url.clone())?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default(
                "database.acquire_timeout_seconds",
                defaults.database.acquire_timeout_seconds as i64,
            )?
            .set_default(
                "database.busy_timeout_ms",
                defaults.database.busy_timeout_ms as i64,
            )?
            .set_default("logging.json", defaults.logging.json)?;

        if let Some(path) = path {
            debug!(path = %path.display(), "Reading configuration file");
            builder = builder.add_source(File::from(path).required(false));
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env);

        let config: PhoneBookConfig = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        config.validate()?;

        debug!(
            environment = %detect_environment(),
            config = %serde_json::to_string(&config)
                .unwrap_or_else(|_| "[serialization error]".to_string()),
            "Configuration loaded"
        );

        Ok(config)
    }
}
