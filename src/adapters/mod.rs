//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the pipelines to external systems:
//! - `http` - reqwest-backed fetch port
//! - `fetch` - Canned fetch port for tests
//! - `storage` - File and in-memory text storage
//! - `commit` - Latest-value state slot
//! - `reporting` - Failure reporters (tracing, recording)

pub mod commit;
pub mod fetch;
pub mod http;
pub mod reporting;
pub mod storage;

pub use commit::StateSlot;
pub use fetch::CannedFetchPort;
pub use http::{HttpFetchConfig, HttpFetchPort, HttpMethod};
pub use reporting::{RecordingFailureReporter, TracingFailureReporter};
pub use storage::{FileStorage, InMemoryStorage};
