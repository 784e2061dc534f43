//! Canned Fetch Port for testing.
//!
//! Returns pre-configured responses instead of calling a transport, so
//! pipelines can be exercised deterministically.
//!
//! # Features
//!
//! - Queued responses, consumed in order, then a fallback
//! - Simulated latency for cancellation testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let port = CannedFetchPort::responding(json!({ "id": 8863 }))
//!     .then_fail(TransportError::Timeout { timeout_secs: 5 });
//!
//! assert!(port.fetch(&FetchParams::new()).await.is_ok());
//! assert!(port.fetch(&FetchParams::new()).await.is_err());
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::sleep;

use crate::ports::{FetchParams, FetchPort, TransportError};

type Canned = Result<Value, TransportError>;

/// Fetch port double with scripted responses.
#[derive(Debug, Clone)]
pub struct CannedFetchPort {
    queued: Arc<Mutex<VecDeque<Canned>>>,
    fallback: Canned,
    delay: Duration,
    calls: Arc<Mutex<Vec<FetchParams>>>,
}

impl CannedFetchPort {
    /// Every call succeeds with `response` unless something is queued.
    pub fn responding(response: Value) -> Self {
        Self::with_fallback(Ok(response))
    }

    /// Every call fails with `error` unless something is queued.
    pub fn failing(error: TransportError) -> Self {
        Self::with_fallback(Err(error))
    }

    fn with_fallback(fallback: Canned) -> Self {
        Self {
            queued: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues a success ahead of the fallback.
    pub fn then_respond(self, response: Value) -> Self {
        lock(&self.queued).push_back(Ok(response));
        self
    }

    /// Queues a failure ahead of the fallback.
    pub fn then_fail(self, error: TransportError) -> Self {
        lock(&self.queued).push_back(Err(error));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Params of every call, in order.
    pub fn calls(&self) -> Vec<FetchParams> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> Canned {
        lock(&self.queued)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl FetchPort for CannedFetchPort {
    async fn fetch(&self, params: &FetchParams) -> Result<Value, TransportError> {
        lock(&self.calls).push(params.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.next_response()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn queued_responses_precede_fallback() {
        let port = CannedFetchPort::responding(json!("fallback"))
            .then_fail(TransportError::network("first"))
            .then_respond(json!("second"));

        let params = FetchParams::new();
        assert_eq!(
            port.fetch(&params).await,
            Err(TransportError::network("first"))
        );
        assert_eq!(port.fetch(&params).await, Ok(json!("second")));
        assert_eq!(port.fetch(&params).await, Ok(json!("fallback")));
        assert_eq!(port.fetch(&params).await, Ok(json!("fallback")));
    }

    #[tokio::test]
    async fn records_params_of_each_call() {
        let port = CannedFetchPort::failing(TransportError::Timeout { timeout_secs: 1 });

        let _ = port.fetch(&FetchParams::new().with("id", 1)).await;
        let _ = port.fetch(&FetchParams::new().with("id", 2)).await;

        assert_eq!(port.call_count(), 2);
        assert_eq!(port.calls()[1].get("id"), Some(&json!(2)));
    }

    #[tokio::test]
    async fn clones_share_call_history() {
        let port = CannedFetchPort::responding(json!({}));
        let clone = port.clone();

        let _ = clone.fetch(&FetchParams::new()).await;
        assert_eq!(port.call_count(), 1);
    }
}
