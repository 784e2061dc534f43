//! Fetch configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::http::{HttpFetchConfig, HttpMethod};

/// Where and how the read pipeline fetches its response
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Endpoint URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// GET (params as query string) or POST (params as JSON body)
    #[serde(default)]
    pub method: HttpMethod,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token sent with every request
    pub api_token: Option<Secret<String>>,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Adapter configuration for [`crate::adapters::HttpFetchPort`].
    pub fn http_config(&self) -> HttpFetchConfig {
        let config = HttpFetchConfig::new(self.base_url.clone())
            .with_method(self.method)
            .with_timeout(self.timeout());

        match &self.api_token {
            Some(token) => config.with_bearer_token(token.expose_secret().clone()),
            None => config,
        }
    }

    /// Validate fetch configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|_| ValidationError::InvalidBaseUrl(self.base_url.clone()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if let Some(token) = &self.api_token {
            if token.expose_secret().trim().is_empty() {
                return Err(ValidationError::BlankApiToken);
            }
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            method: HttpMethod::default(),
            timeout_secs: default_timeout(),
            api_token: None,
        }
    }
}

fn default_base_url() -> String {
    "https://hacker-news.firebaseio.com/v0/item/8863.json".to_string()
}

fn default_timeout() -> u64 {
    30
}
