//! Shape - the untyped, declarative description of a JSON value.
//!
//! Shapes are a small closed set of variants composed recursively. Checking
//! walks the value alongside the shape, collects every mismatch with its full
//! path, and never panics: any `serde_json::Value` yields a result.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::failure::{Path, ValidationFailure, ValidationFailures};

/// Predicate applied by a refinement once the base shape accepts.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A declared object field.
#[derive(Clone, Debug)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
}

impl Field {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

impl<S: Into<String>> From<(S, Shape)> for Field {
    fn from((name, shape): (S, Shape)) -> Self {
        Field::new(name, shape)
    }
}

/// Declarative description of an acceptable JSON value.
#[derive(Clone)]
pub enum Shape {
    String,
    /// Any JSON number.
    Number,
    /// A JSON integer that fits in `i64`. Floats are rejected even when whole.
    Integer,
    /// A non-negative JSON integer that fits in `u64`.
    Unsigned,
    Boolean,
    Null,
    /// Accepts every value.
    Unknown,
    /// Fields in declaration order. Undeclared keys are ignored unless `exact`.
    Object { fields: Vec<Field>, exact: bool },
    Array(Box<Shape>),
    /// Object with arbitrary keys and uniformly shaped values.
    Record(Box<Shape>),
    /// Field may be missing or null; otherwise must match the inner shape.
    Optional(Box<Shape>),
    Union(Vec<Shape>),
    Refined {
        name: String,
        base: Box<Shape>,
        predicate: Predicate,
    },
}

impl Shape {
    /// Permissive object: extra keys are ignored.
    pub fn object<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        Shape::Object {
            fields: fields.into_iter().map(Into::into).collect(),
            exact: false,
        }
    }

    /// Exact object: extra keys are failures.
    pub fn exact_object<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        Shape::Object {
            fields: fields.into_iter().map(Into::into).collect(),
            exact: true,
        }
    }

    pub fn array(element: Shape) -> Self {
        Shape::Array(Box::new(element))
    }

    pub fn record(value: Shape) -> Self {
        Shape::Record(Box::new(value))
    }

    pub fn optional(inner: Shape) -> Self {
        Shape::Optional(Box::new(inner))
    }

    pub fn union(branches: impl IntoIterator<Item = Shape>) -> Self {
        Shape::Union(branches.into_iter().collect())
    }

    /// Narrows `base` with an extra predicate under a brand name.
    pub fn refine<P>(name: impl Into<String>, base: Shape, predicate: P) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Shape::Refined {
            name: name.into(),
            base: Box::new(base),
            predicate: Arc::new(predicate),
        }
    }

    /// Name used in failure descriptions.
    pub fn name(&self) -> String {
        match self {
            Shape::String => "string".to_string(),
            Shape::Number => "number".to_string(),
            Shape::Integer => "integer".to_string(),
            Shape::Unsigned => "unsigned integer".to_string(),
            Shape::Boolean => "boolean".to_string(),
            Shape::Null => "null".to_string(),
            Shape::Unknown => "unknown".to_string(),
            Shape::Object { .. } => "object".to_string(),
            Shape::Array(elem) => format!("array<{}>", elem.name()),
            Shape::Record(value) => format!("record<{}>", value.name()),
            Shape::Optional(inner) => format!("{} | undefined", inner.name()),
            Shape::Union(branches) => branches
                .iter()
                .map(Shape::name)
                .collect::<Vec<_>>()
                .join(" | "),
            Shape::Refined { name, .. } => name.clone(),
        }
    }

    /// Whether an object field with this shape may be left out entirely.
    /// A missing field is treated as `null`.
    pub fn accepts_missing(&self) -> bool {
        match self {
            Shape::Optional(_) | Shape::Unknown => true,
            Shape::Union(branches) => branches.iter().any(Shape::accepts_missing),
            Shape::Refined {
                base, predicate, ..
            } => base.accepts_missing() && predicate(&Value::Null),
            _ => false,
        }
    }

    /// Checks `value`, collecting every failure.
    pub fn check(&self, value: &Value) -> Result<(), ValidationFailures> {
        let mut failures = Vec::new();
        self.check_at(value, &Path::root(), &mut failures);
        match ValidationFailures::from_vec(failures) {
            Some(failures) => Err(failures),
            None => Ok(()),
        }
    }

    fn check_at(&self, value: &Value, path: &Path, out: &mut Vec<ValidationFailure>) {
        match self {
            Shape::String => expect_kind(value.is_string(), self, value, path, out),
            Shape::Number => expect_kind(value.is_number(), self, value, path, out),
            Shape::Integer => expect_kind(value.is_i64(), self, value, path, out),
            Shape::Unsigned => expect_kind(value.is_u64(), self, value, path, out),
            Shape::Boolean => expect_kind(value.is_boolean(), self, value, path, out),
            Shape::Null => expect_kind(value.is_null(), self, value, path, out),
            Shape::Unknown => {}
            Shape::Object { fields, exact } => match value.as_object() {
                Some(obj) => check_object(obj, fields, *exact, path, out),
                None => out.push(ValidationFailure::new(path.clone(), "object", value.clone())),
            },
            Shape::Array(elem) => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        elem.check_at(item, &path.child(i), out);
                    }
                }
                None => out.push(ValidationFailure::new(path.clone(), self.name(), value.clone())),
            },
            Shape::Record(value_shape) => match value.as_object() {
                Some(obj) => {
                    for (key, item) in obj {
                        value_shape.check_at(item, &path.child(key.as_str()), out);
                    }
                }
                None => out.push(ValidationFailure::new(path.clone(), self.name(), value.clone())),
            },
            Shape::Optional(inner) => {
                if !value.is_null() {
                    inner.check_at(value, path, out);
                }
            }
            Shape::Union(branches) => {
                let accepted = branches.iter().any(|branch| {
                    let mut scratch = Vec::new();
                    branch.check_at(value, path, &mut scratch);
                    scratch.is_empty()
                });
                if !accepted {
                    out.push(ValidationFailure::new(path.clone(), self.name(), value.clone()));
                }
            }
            Shape::Refined {
                name,
                base,
                predicate,
            } => {
                let before = out.len();
                base.check_at(value, path, out);
                if out.len() == before && !predicate(value) {
                    out.push(ValidationFailure::new(path.clone(), name.clone(), value.clone()));
                }
            }
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Object { fields, exact } => f
                .debug_struct("Object")
                .field("fields", fields)
                .field("exact", exact)
                .finish(),
            other => write!(f, "{}", other.name()),
        }
    }
}

fn check_object(
    obj: &Map<String, Value>,
    fields: &[Field],
    exact: bool,
    path: &Path,
    out: &mut Vec<ValidationFailure>,
) {
    for field in fields {
        let field_path = path.child(field.name.as_str());
        match obj.get(&field.name) {
            Some(item) => field.shape.check_at(item, &field_path, out),
            None if field.shape.accepts_missing() => {}
            None => out.push(ValidationFailure::new(field_path, field.shape.name(), Value::Null)),
        }
    }

    if exact {
        for key in obj.keys() {
            if !fields.iter().any(|f| &f.name == key) {
                out.push(ValidationFailure::new(
                    path.child(key.as_str()),
                    "no such field",
                    obj[key].clone(),
                ));
            }
        }
    }
}

fn expect_kind(
    ok: bool,
    shape: &Shape,
    value: &Value,
    path: &Path,
    out: &mut Vec<ValidationFailure>,
) {
    if !ok {
        out.push(ValidationFailure::new(path.clone(), shape.name(), value.clone()));
    }
}
