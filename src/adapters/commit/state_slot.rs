//! State Slot - a CommitPort holding the latest committed value.
//!
//! Stands in for a UI state container: the pipeline writes into it and
//! observers read the current value.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::CommitPort;

/// Latest-value state container.
#[derive(Debug)]
pub struct StateSlot<T> {
    value: Arc<RwLock<Option<T>>>,
    commits: Arc<AtomicUsize>,
}

impl<T> StateSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Arc::new(RwLock::new(None)),
            commits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times a value has been committed.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }
}

impl<T: Clone> StateSlot<T> {
    /// The most recently committed value, if any.
    pub async fn current(&self) -> Option<T> {
        self.value.read().await.clone()
    }
}

impl<T> Default for StateSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for StateSlot<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            commits: Arc::clone(&self.commits),
        }
    }
}

#[async_trait]
impl<T: Send + Sync + 'static> CommitPort<T> for StateSlot<T> {
    async fn commit(&self, value: T) {
        *self.value.write().await = Some(value);
        self.commits.fetch_add(1, Ordering::SeqCst);
    }
}
