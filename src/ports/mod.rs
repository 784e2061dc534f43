//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the pipelines and the outside world. Adapters implement these ports.
//!
//! ## Read Path
//!
//! - `FetchPort` - Produces a raw response or a transport failure
//! - `CommitPort` - Receives the transformed value on success
//! - `FailureReporter` - Receives transport and validation failures
//!
//! ## Storage Path
//!
//! - `StoragePort` - Synchronous key/value text storage
//! - `AsyncStoragePort` - Asynchronous key/value text storage

mod commit_port;
mod failure_reporter;
mod fetch_port;
mod storage_port;

pub use commit_port::CommitPort;
pub use failure_reporter::{FailureReporter, PipelineFailure};
pub use fetch_port::{FetchParams, FetchPort, TransportError};
pub use storage_port::{AsyncStoragePort, StorageError, StoragePort};
