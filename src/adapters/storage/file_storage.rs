//! File-based Storage Adapter
//!
//! Stores each key as one file under a base directory. Keys are encoded to a
//! safe file name: ASCII alphanumerics, `-` and `_` pass through, every
//! other byte becomes `%XX`, so distinct keys never share a file.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{AsyncStoragePort, StorageError};

/// File-based key/value text storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage rooted at `base_path`.
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Path of the file backing `key`.
    pub fn file_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() {
            return Err(StorageError::Io("storage key must not be empty".to_string()));
        }
        Ok(self.base_path.join(encode_key(key)))
    }
}

fn encode_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            name.push(byte as char);
        } else {
            name.push_str(&format!("%{:02X}", byte));
        }
    }
    name
}

#[async_trait]
impl AsyncStoragePort for FileStorage {
    async fn write(&self, key: &str, text: &str) -> Result<(), StorageError> {
        let path = self.file_path(key)?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        fs::write(&path, text)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }

    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.file_path(key)?;

        match fs::read_to_string(&path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (FileStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("store"));
        (storage, dir)
    }

    #[test]
    fn plain_keys_are_kept() {
        assert_eq!(encode_key("test"), "test");
        assert_eq!(encode_key("hn-item_8863"), "hn-item_8863");
    }

    #[test]
    fn unsafe_characters_are_escaped() {
        assert_eq!(encode_key("../etc"), "%2E%2E%2Fetc");
        assert_eq!(encode_key("a b"), "a%20b");
        assert_ne!(encode_key("a/b"), encode_key("a_b"));
    }

    #[test]
    fn empty_key_is_rejected() {
        let (storage, _dir) = setup();
        assert!(storage.file_path("").is_err());
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let (storage, _dir) = setup();
        assert_eq!(storage.read("missing").await, Ok(None));
    }

    #[tokio::test]
    async fn write_creates_directory_and_round_trips_text() {
        let (storage, _dir) = setup();

        storage.write("test", r#"{"a":1,"b":2}"#).await.unwrap();

        assert!(storage.base_path().exists());
        assert_eq!(
            storage.read("test").await,
            Ok(Some(r#"{"a":1,"b":2}"#.to_string()))
        );
    }

    #[tokio::test]
    async fn escaped_key_stays_inside_base_directory() {
        let (storage, dir) = setup();

        storage.write("../outside", "x").await.unwrap();

        assert!(!dir.path().join("outside").exists());
        assert_eq!(storage.read("../outside").await, Ok(Some("x".to_string())));
    }

    #[tokio::test]
    async fn read_of_directory_is_io_error() {
        let (storage, _dir) = setup();
        std::fs::create_dir_all(storage.base_path().join("dir")).unwrap();

        assert!(matches!(storage.read("dir").await, Err(StorageError::Io(_))));
    }
}
