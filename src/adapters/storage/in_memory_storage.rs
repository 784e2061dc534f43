//! In-memory Storage Adapter
//!
//! Keeps text in a map behind a lock. Implements both the synchronous and
//! the async storage port, so the same instance can back either codec
//! pipeline in tests and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{AsyncStoragePort, StorageError, StoragePort};

/// In-memory key/value text storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a key with raw text, bypassing any codec.
    pub fn with_entry(self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.into(), text.into());
        self
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_entry(&self, key: &str, text: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), text.to_string());
        Ok(())
    }

    fn read_entry(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }
}

impl StoragePort for InMemoryStorage {
    fn write(&self, key: &str, text: &str) -> Result<(), StorageError> {
        self.write_entry(key, text)
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read_entry(key)
    }
}

#[async_trait]
impl AsyncStoragePort for InMemoryStorage {
    async fn write(&self, key: &str, text: &str) -> Result<(), StorageError> {
        self.write_entry(key, text)
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.read_entry(key)
    }
}
