//! Two-field record used for storage smoke checks.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::schema::{Schema, Shape};

/// Key the record is stored under by default.
pub const PAIR_RECORD_KEY: &str = "test";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub a: f64,
    pub b: f64,
}

static SCHEMA: Lazy<Schema<PairRecord>> =
    Lazy::new(|| Schema::new(Shape::exact_object([("a", Shape::Number), ("b", Shape::Number)])));

impl PairRecord {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn schema() -> Schema<PairRecord> {
        SCHEMA.clone()
    }
}
