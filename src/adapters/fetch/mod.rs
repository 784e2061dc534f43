//! Fetch port doubles.

mod canned;

pub use canned::CannedFetchPort;
