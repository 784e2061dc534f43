//! Fetch Port - the untrusted side of the read path.
//!
//! A fetch port turns request parameters into a raw JSON response or a
//! transport failure. It says nothing about HTTP methods or headers; the
//! pipeline only needs this two-outcome async contract. Timeouts and
//! retries, if any, live inside the implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

pub use crate::domain::errors::TransportError;

/// Port for fetching a raw response.
///
/// # Contract
///
/// Implementations must:
/// - Return the response body as parsed JSON, unvalidated
/// - Map every transport problem to a [`TransportError`] instead of panicking
/// - Have no side effects visible to the pipeline if the future is dropped
#[async_trait]
pub trait FetchPort: Send + Sync {
    async fn fetch(&self, params: &FetchParams) -> Result<Value, TransportError>;
}

/// Caller-supplied query/filter fields. Never validated by the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FetchParams(BTreeMap<String, Value>);

impl FetchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds every field of `other`, overwriting existing keys.
    pub fn merge(mut self, other: FetchParams) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Flattens a serializable struct into top-level params. Anything that
    /// does not serialize to an object becomes a single `value` entry.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let params = match serde_json::to_value(value)? {
            Value::Object(map) => Self::from(map),
            Value::Null => Self::new(),
            other => Self::new().with("value", other),
        };
        Ok(params)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_json(&self) -> Value {
        Value::Object(self.0.clone().into_iter().collect())
    }

    /// Params flattened for a query string: scalars as text, arrays of
    /// scalars comma-joined, anything else as JSON text. Nulls are dropped.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), query_text(v)))
            .collect()
    }
}

impl From<Map<String, Value>> for FetchParams {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().collect())
    }
}

fn query_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) if items.iter().all(is_scalar) => items
            .iter()
            .map(query_text)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    matches!(value, Value::String(_) | Value::Number(_) | Value::Bool(_))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_pairs_flatten_scalars_and_lists() {
        let params = FetchParams::new()
            .with("sort_stat", "stat_cost")
            .with("page", 2)
            .with("fields", json!(["a", "b"]))
            .with("dateRange", json!({ "st": "2021-10-10" }))
            .with("skip", Value::Null);

        let pairs = params.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("dateRange".to_string(), r#"{"st":"2021-10-10"}"#.to_string()),
                ("fields".to_string(), "a,b".to_string()),
                ("page".to_string(), "2".to_string()),
                ("sort_stat".to_string(), "stat_cost".to_string()),
            ]
        );
    }

    #[test]
    fn from_serializable_flattens_struct_fields() {
        #[derive(Serialize)]
        struct Query {
            id: u32,
            tags: Vec<&'static str>,
        }

        let params = FetchParams::from_serializable(&Query {
            id: 8863,
            tags: vec!["story"],
        })
        .unwrap();
        assert_eq!(params.get("id"), Some(&json!(8863)));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn merge_overwrites_existing_keys() {
        let merged = FetchParams::new()
            .with("a", 1)
            .with("b", 1)
            .merge(FetchParams::new().with("b", 2));
        assert_eq!(merged.as_json(), json!({ "a": 1, "b": 2 }));
    }

    #[test]
    fn transport_error_reason_is_opaque_text() {
        let err = TransportError::network("connection refused");
        assert_eq!(err.reason(), "network error: connection refused");
    }
}
