//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `GATEKEEPER` prefix and nested values use double underscores as separators.
//! Every setting has a default, so an empty environment yields a working
//! configuration.
//!
//! # Example
//!
//! ```no_run
//! use gatekeeper::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Fetching from {}", config.fetch.base_url);
//! ```

mod error;
mod fetch;
mod logging;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use fetch::FetchConfig;
pub use logging::LoggingConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Fetch configuration (endpoint, method, timeout, token)
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Storage configuration (directory, text format)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `GATEKEEPER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `GATEKEEPER__FETCH__TIMEOUT_SECS=10` -> `fetch.timeout_secs = 10`
    /// - `GATEKEEPER__STORAGE__FORMAT=yaml` -> `storage.format = yaml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("GATEKEEPER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load then validate in one step.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.fetch.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
