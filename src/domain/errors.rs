//! Failure taxonomy for I/O the core does not perform itself.
//!
//! Ports report their failures with these types; the pipelines carry them
//! as data and never turn them into panics.

use thiserror::Error;

/// A fetch port could not produce a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    InvalidBody(String),
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        TransportError::Network(message.into())
    }

    /// The opaque reason string surfaced to failure reporters.
    pub fn reason(&self) -> String {
        self.to_string()
    }

    /// Status errors carry at most this many bytes of body.
    pub const MAX_BODY_EXCERPT: usize = 200;

    pub fn status(status: u16, body: &str) -> Self {
        let body = if body.len() > Self::MAX_BODY_EXCERPT {
            let mut end = Self::MAX_BODY_EXCERPT;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}...", &body[..end])
        } else {
            body.to_string()
        };
        TransportError::Status { status, body }
    }
}

/// The storage medium failed to read or write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_is_display_text() {
        let err = TransportError::Timeout { timeout_secs: 30 };
        assert_eq!(err.reason(), "request timed out after 30s");
    }

    #[test]
    fn status_truncates_long_bodies() {
        let err = TransportError::status(502, &"x".repeat(1000));
        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.len(), TransportError::MAX_BODY_EXCERPT + 3);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn status_truncation_respects_char_boundaries() {
        let body = "é".repeat(150);
        let err = TransportError::status(500, &body);
        assert!(err.reason().ends_with("..."));
    }
}
