//! Application layer - the two boundary-crossing pipelines.
//!
//! This layer orchestrates domain operations and coordinates between ports:
//! - `pipeline` - fetch → validate → transform → commit (read path)
//! - `stored_value` - encode → persist / read → decode (storage path)

pub mod pipeline;
pub mod stored_value;

pub use pipeline::{run_pipeline, FetchAndCommitHandler};
pub use stored_value::{AsyncStoredValue, StoredValue};
