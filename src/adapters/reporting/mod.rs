//! Failure reporters.
//!
//! - **TracingFailureReporter** - Structured `warn` events (production)
//! - **RecordingFailureReporter** - In-memory list (testing)

mod recording_reporter;
mod tracing_reporter;

pub use recording_reporter::RecordingFailureReporter;
pub use tracing_reporter::TracingFailureReporter;
