//! Storage Port - key/value text storage behind the codec pipeline.
//!
//! Two flavours share one contract: a synchronous port for media that
//! answer immediately (an in-process map, a browser-style local store) and
//! an async port for media behind I/O (files, remote stores).
//!
//! Reads distinguish three outcomes: text present (`Ok(Some)`), key never
//! written (`Ok(None)`), and medium failure (`Err`). Neither port promises
//! atomicity across concurrent callers.

use async_trait::async_trait;

pub use crate::domain::errors::StorageError;

/// Synchronous key/value text store.
pub trait StoragePort: Send + Sync {
    fn write(&self, key: &str, text: &str) -> Result<(), StorageError>;

    /// `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
}

/// Asynchronous key/value text store.
#[async_trait]
pub trait AsyncStoragePort: Send + Sync {
    async fn write(&self, key: &str, text: &str) -> Result<(), StorageError>;

    /// `Ok(None)` when the key has never been written.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
}
