//! Schema - runtime-checked description of values crossing the trust boundary.
//!
//! A [`Shape`] describes what a JSON value must look like; a [`Schema<T>`]
//! ties a shape to the Rust type produced when the check succeeds. The only
//! way to obtain a `T` from untrusted input is [`Schema::check`].
//!
//! # Example
//!
//! ```
//! use gatekeeper::domain::schema::{Schema, Shape};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Point { x: f64, y: f64 }
//!
//! let schema: Schema<Point> = Schema::new(Shape::object([
//!     ("x", Shape::Number),
//!     ("y", Shape::Number),
//! ]));
//!
//! let point = schema.check(&json!({ "x": 1, "y": 2.5 })).unwrap();
//! assert_eq!(point.y, 2.5);
//! assert!(schema.check(&json!({ "x": "1" })).is_err());
//! ```

mod failure;
mod shape;

pub use failure::{Path, PathSegment, ValidationFailure, ValidationFailures};
pub use shape::{Field, Predicate, Shape};

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A shape bound to the Rust type it produces.
///
/// Immutable and cheap to clone; build once and share across calls.
pub struct Schema<T> {
    shape: Arc<Shape>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Schema<T> {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape: Arc::new(shape),
            _marker: PhantomData,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl<T: DeserializeOwned> Schema<T> {
    /// Checks an untrusted value and produces the typed value.
    ///
    /// Total: every input yields `Ok` or `Err`. The input is never mutated
    /// or coerced.
    pub fn check(&self, value: &Value) -> Result<T, ValidationFailures> {
        self.shape.check(value)?;
        serde_json::from_value(value.clone()).map_err(|e| {
            tracing::debug!(
                target_type = std::any::type_name::<T>(),
                error = %e,
                "shape accepted value but typed decode failed"
            );
            ValidationFailures::single(ValidationFailure::new(
                Path::root(),
                format!("value decodable as {}", short_type_name::<T>()),
                value.clone(),
            ))
        })
    }
}

impl<T> Clone for Schema<T> {
    fn clone(&self) -> Self {
        Self {
            shape: Arc::clone(&self.shape),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Schema<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("type", &short_type_name::<T>())
            .field("shape", &self.shape)
            .finish()
    }
}

/// Standard service response envelope wrapping `data`.
///
/// `{ code: integer, msg: string, extra?: record<unknown>, data }`
pub fn api_envelope(data: Shape) -> Shape {
    Shape::object([
        ("code", Shape::Integer),
        ("msg", Shape::String),
        ("extra", Shape::optional(Shape::record(Shape::Unknown))),
        ("data", data),
    ])
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
