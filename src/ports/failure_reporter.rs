//! Failure Reporter - the single sanctioned sink for pipeline failures.

pub use crate::domain::outcome::PipelineFailure;

/// Receives every transport and validation failure exactly once.
pub trait FailureReporter: Send + Sync {
    fn report(&self, failure: &PipelineFailure);
}
