//! Gatekeeper - schema-validated boundary crossings.
//!
//! Untrusted data entering the process (a network response, a persisted
//! blob) and trusted data leaving it (text written to storage) pass through
//! a runtime-checked schema first. Two pipelines share that step:
//!
//! - fetch → validate → transform → commit ([`application::pipeline`])
//! - encode → persist / read → decode ([`application::stored_value`])
//!
//! Every failure is returned as data and routed to one reporter; nothing
//! here panics on bad input.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod logging;
pub mod ports;
