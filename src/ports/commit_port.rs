//! Commit Port - where a successful pipeline hands over its value.
//!
//! Typically a state container the UI observes, or a repository writer.
//! The pipeline calls it at most once per invocation and only on success.

use async_trait::async_trait;

#[async_trait]
pub trait CommitPort<T: Send + 'static>: Send + Sync {
    async fn commit(&self, value: T);
}
