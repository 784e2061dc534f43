//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::codec::TextFormat;

/// Where stored values live and how they are encoded
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Base directory for file storage
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Text encoding for stored values (json or yaml)
    #[serde(default)]
    pub format: TextFormat,
}

impl StorageConfig {
    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir)
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.trim().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            format: TextFormat::default(),
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}
