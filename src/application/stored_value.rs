//! Stored values - typed keys over a storage port, guarded by a codec.
//!
//! Writing encodes through the codec's schema before any text reaches the
//! medium; reading decodes and validates before any value reaches the
//! caller. A key that was never written reads as `Absent`, which is a valid
//! outcome and never a stand-in for malformed text.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::domain::codec::Codec;
use crate::domain::outcome::{ReadFailure, ReadOutcome, WriteFailure};
use crate::ports::{AsyncStoragePort, StoragePort};

/// Typed key over a synchronous storage port.
///
/// Callers pass continuations for each outcome, so every branch must be
/// handled at the call site.
pub struct StoredValue<T> {
    storage: Arc<dyn StoragePort>,
    key: String,
    codec: Codec<T>,
}

impl<T> StoredValue<T> {
    pub fn new(storage: Arc<dyn StoragePort>, key: impl Into<String>, codec: Codec<T>) -> Self {
        Self {
            storage,
            key: key.into(),
            codec,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T: Serialize> StoredValue<T> {
    /// Encodes and writes `value`, then calls exactly one continuation.
    pub fn save(&self, value: &T, on_failure: impl FnOnce(WriteFailure), on_success: impl FnOnce()) {
        match self.try_save(value) {
            Ok(()) => on_success(),
            Err(failure) => on_failure(failure),
        }
    }

    pub fn try_save(&self, value: &T) -> Result<(), WriteFailure> {
        let text = self.codec.encode(value)?;
        self.storage.write(&self.key, &text)?;
        debug!(key = %self.key, format = %self.codec.format(), "stored value written");
        Ok(())
    }
}

impl<T: DeserializeOwned> StoredValue<T> {
    /// Reads and decodes, then calls exactly one continuation.
    pub fn load_with<R>(
        &self,
        on_none: impl FnOnce() -> R,
        on_failure: impl FnOnce(ReadFailure) -> R,
        on_some: impl FnOnce(T) -> R,
    ) -> R {
        match self.load() {
            ReadOutcome::Present(value) => on_some(value),
            ReadOutcome::Absent => on_none(),
            ReadOutcome::Failed(failure) => on_failure(failure),
        }
    }

    pub fn load(&self) -> ReadOutcome<T> {
        match self.storage.read(&self.key) {
            Ok(Some(text)) => decode(&self.codec, &self.key, &text),
            Ok(None) => {
                debug!(key = %self.key, "stored value absent");
                ReadOutcome::Absent
            }
            Err(e) => ReadOutcome::Failed(ReadFailure::Storage(e)),
        }
    }
}

impl<T> fmt::Debug for StoredValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredValue")
            .field("key", &self.key)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

/// Typed key over an asynchronous storage port.
pub struct AsyncStoredValue<T> {
    storage: Arc<dyn AsyncStoragePort>,
    key: String,
    codec: Codec<T>,
}

impl<T> AsyncStoredValue<T> {
    pub fn new(
        storage: Arc<dyn AsyncStoragePort>,
        key: impl Into<String>,
        codec: Codec<T>,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
            codec,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<T: Serialize> AsyncStoredValue<T> {
    pub async fn save(&self, value: &T) -> Result<(), WriteFailure> {
        let text = self.codec.encode(value)?;
        self.storage.write(&self.key, &text).await?;
        debug!(key = %self.key, format = %self.codec.format(), "stored value written");
        Ok(())
    }
}

impl<T: DeserializeOwned> AsyncStoredValue<T> {
    pub async fn load(&self) -> ReadOutcome<T> {
        match self.storage.read(&self.key).await {
            Ok(Some(text)) => decode(&self.codec, &self.key, &text),
            Ok(None) => {
                debug!(key = %self.key, "stored value absent");
                ReadOutcome::Absent
            }
            Err(e) => ReadOutcome::Failed(ReadFailure::Storage(e)),
        }
    }
}

impl<T> fmt::Debug for AsyncStoredValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncStoredValue")
            .field("key", &self.key)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(codec: &Codec<T>, key: &str, text: &str) -> ReadOutcome<T> {
    match codec.decode(text) {
        Ok(value) => ReadOutcome::Present(value),
        Err(e) => {
            debug!(key = %key, error = %e, "stored value failed to decode");
            ReadOutcome::Failed(ReadFailure::Decode(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStorage;
    use crate::domain::codec::{DecodeError, EncodeError};
    use crate::domain::sample::{PairRecord, PAIR_RECORD_KEY};
    use crate::ports::StorageError;
    use async_trait::async_trait;
    use std::cell::Cell;

    fn sync_value(storage: &InMemoryStorage) -> StoredValue<PairRecord> {
        StoredValue::new(
            Arc::new(storage.clone()),
            PAIR_RECORD_KEY,
            Codec::json(PairRecord::schema()),
        )
    }

    struct BrokenStorage;

    impl StoragePort for BrokenStorage {
        fn write(&self, _key: &str, _text: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io("disk gone".to_string()))
        }
    }

    #[async_trait]
    impl AsyncStoragePort for BrokenStorage {
        async fn write(&self, _key: &str, _text: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }

        async fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io("disk gone".to_string()))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // StoredValue
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn save_then_load_returns_value() {
        let storage = InMemoryStorage::new();
        let stored = sync_value(&storage);
        let saved = Cell::new(false);

        stored.save(
            &PairRecord::new(1.0, 2.0),
            |e| panic!("unexpected failure {:?}", e),
            || saved.set(true),
        );

        assert!(saved.get());
        assert_eq!(stored.load(), ReadOutcome::Present(PairRecord::new(1.0, 2.0)));
    }

    #[test]
    fn load_with_unwritten_key_calls_on_none() {
        let storage = InMemoryStorage::new();
        let stored = sync_value(&storage);

        let branch = stored.load_with(|| "none", |_| "failure", |_| "some");

        assert_eq!(branch, "none");
    }

    #[test]
    fn malformed_text_is_parse_failure_not_absent() {
        let storage = InMemoryStorage::new().with_entry(PAIR_RECORD_KEY, "{not json");
        let stored = sync_value(&storage);

        match stored.load() {
            ReadOutcome::Failed(ReadFailure::Decode(e)) => assert!(e.is_parse()),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[test]
    fn wrong_shape_is_validation_failure() {
        let storage = InMemoryStorage::new().with_entry(PAIR_RECORD_KEY, r#"{"a":1}"#);
        let stored = sync_value(&storage);

        let failure = stored.load_with(|| None, Some, |_| None);

        match failure {
            Some(ReadFailure::Decode(DecodeError::Validation(failures))) => {
                assert!(failures.has_path(&["b"]));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn storage_failures_reach_the_failure_continuation() {
        let stored: StoredValue<PairRecord> = StoredValue::new(
            Arc::new(BrokenStorage),
            PAIR_RECORD_KEY,
            Codec::json(PairRecord::schema()),
        );
        let write_failure = Cell::new(None);

        stored.save(
            &PairRecord::new(1.0, 2.0),
            |e| write_failure.set(Some(e)),
            || panic!("unexpected success"),
        );

        assert_eq!(
            write_failure.take(),
            Some(WriteFailure::Storage(StorageError::Unavailable(
                "quota exceeded".to_string()
            )))
        );
        assert_eq!(
            stored.load(),
            ReadOutcome::Failed(ReadFailure::Storage(StorageError::Io(
                "disk gone".to_string()
            )))
        );
    }

    #[test]
    fn value_violating_schema_is_never_written() {
        let storage = InMemoryStorage::new();
        let stored = sync_value(&storage);

        let result = stored.try_save(&PairRecord::new(f64::NAN, 2.0));

        assert!(matches!(
            result,
            Err(WriteFailure::Encode(EncodeError::Validation(_)))
        ));
        assert!(storage.is_empty());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // AsyncStoredValue
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn async_save_then_load_returns_value() {
        let stored = AsyncStoredValue::new(
            Arc::new(InMemoryStorage::new()),
            "pair",
            Codec::yaml(PairRecord::schema()),
        );

        stored.save(&PairRecord::new(3.5, -1.0)).await.unwrap();

        assert_eq!(
            stored.load().await,
            ReadOutcome::Present(PairRecord::new(3.5, -1.0))
        );
    }

    #[tokio::test]
    async fn async_missing_key_is_absent() {
        let stored: AsyncStoredValue<PairRecord> = AsyncStoredValue::new(
            Arc::new(InMemoryStorage::new()),
            "missing",
            Codec::json(PairRecord::schema()),
        );

        assert!(stored.load().await.is_absent());
    }

    #[tokio::test]
    async fn async_storage_failure_is_reported() {
        let stored: AsyncStoredValue<PairRecord> = AsyncStoredValue::new(
            Arc::new(BrokenStorage),
            "k",
            Codec::json(PairRecord::schema()),
        );

        assert!(matches!(
            stored.save(&PairRecord::new(0.0, 0.0)).await,
            Err(WriteFailure::Storage(_))
        ));
        assert!(matches!(
            stored.load().await,
            ReadOutcome::Failed(ReadFailure::Storage(_))
        ));
    }
}
