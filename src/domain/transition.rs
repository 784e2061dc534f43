//! ValidatedTransition - the one step every boundary crossing shares.
//!
//! Untrusted JSON goes in, a schema check runs, and only on success does a
//! pure transform reshape the checked value. The fetch pipeline uses it with
//! a business transform; storage decoding uses it with the identity.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::schema::{Schema, ValidationFailures};

/// Schema check followed by a pure, infallible transform.
pub struct ValidatedTransition<W, D, F = fn(W) -> D> {
    schema: Schema<W>,
    transform: F,
    _output: PhantomData<fn() -> D>,
}

impl<W, D, F> ValidatedTransition<W, D, F>
where
    W: DeserializeOwned,
    F: Fn(W) -> D,
{
    pub fn new(schema: Schema<W>, transform: F) -> Self {
        Self {
            schema,
            transform,
            _output: PhantomData,
        }
    }

    pub fn schema(&self) -> &Schema<W> {
        &self.schema
    }

    /// Validation stage then transform stage.
    pub fn apply(&self, raw: &Value) -> Result<D, ValidationFailures> {
        let checked = self.schema.check(raw)?;
        Ok((self.transform)(checked))
    }
}

impl<W: DeserializeOwned> ValidatedTransition<W, W> {
    /// Check only; the checked value is the result.
    pub fn identity(schema: Schema<W>) -> Self {
        Self::new(schema, std::convert::identity)
    }
}

impl<W, D, F> fmt::Debug for ValidatedTransition<W, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatedTransition")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
