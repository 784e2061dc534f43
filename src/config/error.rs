//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fetch base URL must be an absolute http(s) URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid fetch timeout (must be 1..=300 seconds)")]
    InvalidTimeout,

    #[error("Fetch API token must not be blank")]
    BlankApiToken,

    #[error("Storage data directory must not be empty")]
    EmptyDataDir,

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
