//! Failure reporter that writes to the tracing pipeline.

use tracing::warn;

use crate::ports::{FailureReporter, PipelineFailure};

/// Logs every failure at `warn` with structured fields.
///
/// Transport failures log once with their reason; validation failures log
/// one event per failing path so each mismatch is searchable on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingFailureReporter;

impl TracingFailureReporter {
    pub fn new() -> Self {
        Self
    }
}

impl FailureReporter for TracingFailureReporter {
    fn report(&self, failure: &PipelineFailure) {
        match failure {
            PipelineFailure::Transport(error) => {
                warn!(kind = "transport", reason = %error.reason(), "fetch failed");
            }
            PipelineFailure::Validation(failures) => {
                let total = failures.len();
                for failure in failures.iter() {
                    warn!(
                        kind = "validation",
                        path = %failure.path,
                        expected = %failure.expected,
                        actual = %failure.actual,
                        total,
                        "response failed schema check"
                    );
                }
            }
        }
    }
}
