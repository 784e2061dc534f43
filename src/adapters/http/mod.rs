//! HTTP adapters - transport implementations of the fetch port.

mod fetch_port;

pub use fetch_port::{HttpFetchConfig, HttpFetchPort, HttpMethod};
