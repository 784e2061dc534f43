//! Codec - schema-checked text encoding and decoding.
//!
//! `decode` = parse text, then check against the schema.
//! `encode` = check the value against the schema, then render text.
//!
//! Parse failures and schema failures stay distinct so callers can tell
//! corrupted storage apart from data written under an older shape.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::schema::{Schema, ValidationFailures};
use crate::domain::transition::ValidatedTransition;

/// Text encoding used for stored values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextFormat {
    #[default]
    Json,
    Yaml,
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextFormat::Json => write!(f, "json"),
            TextFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Text that is not well-formed in the codec's base encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {format} text: {message}")]
pub struct ParseFailure {
    pub format: TextFormat,
    pub message: String,
}

/// Why decoding failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Parse(#[from] ParseFailure),

    #[error("decoded value failed schema: {0}")]
    Validation(#[from] ValidationFailures),
}

impl DecodeError {
    pub fn is_parse(&self) -> bool {
        matches!(self, DecodeError::Parse(_))
    }

    pub fn validation_failures(&self) -> Option<&ValidationFailures> {
        match self {
            DecodeError::Validation(failures) => Some(failures),
            DecodeError::Parse(_) => None,
        }
    }
}

/// Why encoding failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("value could not be serialized: {0}")]
    Serialize(String),

    /// The caller tried to persist a value its own schema rejects.
    #[error("refusing to encode value that fails its schema: {0}")]
    Validation(#[from] ValidationFailures),
}

/// Schema plus text format.
pub struct Codec<T> {
    schema: Schema<T>,
    format: TextFormat,
}

impl<T> Codec<T> {
    pub fn new(schema: Schema<T>, format: TextFormat) -> Self {
        Self { schema, format }
    }

    pub fn json(schema: Schema<T>) -> Self {
        Self::new(schema, TextFormat::Json)
    }

    pub fn yaml(schema: Schema<T>) -> Self {
        Self::new(schema, TextFormat::Yaml)
    }

    pub fn schema(&self) -> &Schema<T> {
        &self.schema
    }

    pub fn format(&self) -> TextFormat {
        self.format
    }

    fn parse_text(&self, text: &str) -> Result<Value, ParseFailure> {
        let parsed = match self.format {
            TextFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            TextFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ParseFailure {
            format: self.format,
            message,
        })
    }

    fn render_text(&self, value: &Value) -> Result<String, EncodeError> {
        match self.format {
            TextFormat::Json => {
                serde_json::to_string(value).map_err(|e| EncodeError::Serialize(e.to_string()))
            }
            TextFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|e| EncodeError::Serialize(e.to_string()))
            }
        }
    }
}

impl<T: DeserializeOwned> Codec<T> {
    pub fn decode(&self, text: &str) -> Result<T, DecodeError> {
        let value = self.parse_text(text)?;
        let value = ValidatedTransition::identity(self.schema.clone()).apply(&value)?;
        Ok(value)
    }
}

impl<T: Serialize> Codec<T> {
    pub fn encode(&self, value: &T) -> Result<String, EncodeError> {
        let json = serde_json::to_value(value).map_err(|e| EncodeError::Serialize(e.to_string()))?;
        if let Err(failures) = self.schema.shape().check(&json) {
            tracing::error!(
                type_name = std::any::type_name::<T>(),
                failures = %failures,
                "attempted to encode a value that violates its own schema"
            );
            return Err(EncodeError::Validation(failures));
        }
        self.render_text(&json)
    }
}

impl<T> Clone for Codec<T> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            format: self.format,
        }
    }
}

impl<T> fmt::Debug for Codec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("schema", &self.schema)
            .field("format", &self.format)
            .finish()
    }
}
