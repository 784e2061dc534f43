//! Outcome types threaded through the read path and the storage path.

use thiserror::Error;

use crate::domain::codec::{DecodeError, EncodeError};
use crate::domain::errors::{StorageError, TransportError};
use crate::domain::schema::ValidationFailures;

/// Result of one fetch pipeline invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome<T> {
    Success(T),
    TransportFailure(TransportError),
    ValidationFailure(ValidationFailures),
}

impl<T> PipelineOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PipelineOutcome<U> {
        match self {
            PipelineOutcome::Success(value) => PipelineOutcome::Success(f(value)),
            PipelineOutcome::TransportFailure(e) => PipelineOutcome::TransportFailure(e),
            PipelineOutcome::ValidationFailure(e) => PipelineOutcome::ValidationFailure(e),
        }
    }

    pub fn success(self) -> Option<T> {
        match self {
            PipelineOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<PipelineFailure> {
        match self {
            PipelineOutcome::Success(_) => None,
            PipelineOutcome::TransportFailure(e) => Some(PipelineFailure::Transport(e.clone())),
            PipelineOutcome::ValidationFailure(e) => Some(PipelineFailure::Validation(e.clone())),
        }
    }

    pub fn into_result(self) -> Result<T, PipelineFailure> {
        match self {
            PipelineOutcome::Success(value) => Ok(value),
            PipelineOutcome::TransportFailure(e) => Err(PipelineFailure::Transport(e)),
            PipelineOutcome::ValidationFailure(e) => Err(PipelineFailure::Validation(e)),
        }
    }
}

impl<T> From<Result<T, PipelineFailure>> for PipelineOutcome<T> {
    fn from(result: Result<T, PipelineFailure>) -> Self {
        match result {
            Ok(value) => PipelineOutcome::Success(value),
            Err(PipelineFailure::Transport(e)) => PipelineOutcome::TransportFailure(e),
            Err(PipelineFailure::Validation(e)) => PipelineOutcome::ValidationFailure(e),
        }
    }
}

/// The failure half of [`PipelineOutcome`], as handed to failure reporters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineFailure {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("validation failure: {0}")]
    Validation(#[from] ValidationFailures),
}

/// Why a stored value could not be read.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadFailure {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Why a value could not be stored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WriteFailure {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of reading a key through a codec.
///
/// `Absent` is a valid outcome, not an error, and is never produced for a
/// key whose text is present but malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    Present(T),
    Absent,
    Failed(ReadFailure),
}

impl<T> ReadOutcome<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, ReadOutcome::Absent)
    }

    pub fn present(self) -> Option<T> {
        match self {
            ReadOutcome::Present(value) => Some(value),
            _ => None,
        }
    }

    /// `Ok(None)` for absent, `Err` for failures.
    pub fn into_result(self) -> Result<Option<T>, ReadFailure> {
        match self {
            ReadOutcome::Present(value) => Ok(Some(value)),
            ReadOutcome::Absent => Ok(None),
            ReadOutcome::Failed(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_only_touches_success() {
        let ok: PipelineOutcome<u32> = PipelineOutcome::Success(2);
        assert_eq!(ok.map(|n| n * 10), PipelineOutcome::Success(20));

        let failed: PipelineOutcome<u32> =
            PipelineOutcome::TransportFailure(TransportError::network("down"));
        assert!(!failed.map(|n| n * 10).is_success());
    }

    #[test]
    fn into_result_round_trips_through_from() {
        let outcome: PipelineOutcome<&str> =
            PipelineOutcome::TransportFailure(TransportError::Timeout { timeout_secs: 5 });
        let back: PipelineOutcome<&str> = outcome.clone().into_result().into();
        assert_eq!(back, outcome);
    }

    #[test]
    fn failure_is_none_on_success() {
        assert!(PipelineOutcome::Success(()).failure().is_none());
    }

    #[test]
    fn read_outcome_into_result() {
        assert_eq!(ReadOutcome::<u8>::Absent.into_result(), Ok(None));
        assert_eq!(ReadOutcome::Present(3u8).into_result(), Ok(Some(3)));

        let failed: ReadOutcome<u8> =
            ReadOutcome::Failed(ReadFailure::Storage(StorageError::Io("disk".into())));
        assert!(failed.into_result().is_err());
    }
}
