//! Storage Adapters
//!
//! Implementations of the storage ports behind the codec pipelines.
//!
//! ## Available Adapters
//!
//! - **FileStorage** - One file per key on disk (async port)
//! - **InMemoryStorage** - A shared map (sync and async ports)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileStorage, InMemoryStorage};
//!
//! // Production: file-based storage
//! let storage = FileStorage::new("./data");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryStorage::new();
//! ```

mod file_storage;
mod in_memory_storage;

pub use file_storage::FileStorage;
pub use in_memory_storage::InMemoryStorage;
