//! Validation failures - the single failure shape produced by schema checks.
//!
//! Every schema mismatch in the crate is reported as a [`ValidationFailure`]
//! carrying the path to the offending value, a description of what was
//! expected, and the value that was actually found. Failures are only ever
//! built by [`Shape::check`](super::Shape::check), so reports from the fetch
//! pipeline and from storage decoding look identical.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// One step into a JSON value: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Location of a value inside a document, root first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    /// The document root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Returns a new path extended by one segment.
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path keys as plain strings (indices rendered as numbers).
    pub fn to_strings(&self) -> Vec<String> {
        self.0
            .iter()
            .map(|s| match s {
                PathSegment::Key(k) => k.clone(),
                PathSegment::Index(i) => i.to_string(),
            })
            .collect()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if i == 0 => write!(f, "{}", k)?,
                PathSegment::Key(k) => write!(f, ".{}", k)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

/// A single schema mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationFailure {
    pub path: Path,
    pub expected: String,
    /// The offending value; `Value::Null` stands in for a missing field.
    pub actual: Value,
}

impl ValidationFailure {
    pub(crate) fn new(path: Path, expected: impl Into<String>, actual: Value) -> Self {
        Self {
            path,
            expected: expected.into(),
            actual,
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: expected {}, got {}",
            self.path,
            self.expected,
            describe(&self.actual)
        )
    }
}

/// Non-empty, ordered list of failures from one schema check.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render(.0))]
pub struct ValidationFailures(Vec<ValidationFailure>);

impl ValidationFailures {
    /// Wraps collected failures. Returns `None` when there are none, so an
    /// empty failure list can never be observed.
    pub(crate) fn from_vec(failures: Vec<ValidationFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self(failures))
        }
    }

    pub(crate) fn single(failure: ValidationFailure) -> Self {
        Self(vec![failure])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a value that exists.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> &ValidationFailure {
        &self.0[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.0.iter()
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.0.iter().map(|f| &f.path).collect()
    }

    /// True when some failure sits exactly at `path`.
    pub fn has_path<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.0.iter().any(|f| {
            let strings = f.path.to_strings();
            strings.len() == path.len() && strings.iter().zip(path).all(|(a, b)| a == b.as_ref())
        })
    }

    pub fn into_vec(self) -> Vec<ValidationFailure> {
        self.0
    }
}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

fn render(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Short human description of a JSON value for failure messages.
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 40 => {
            format!("string \"{}...\"", s.chars().take(37).collect::<String>())
        }
        Value::String(s) => format!("string \"{}\"", s),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn path_renders_dotted_with_indices() {
        let path = Path::root().child("data").child("stats").child(2).child("metrics");
        assert_eq!(path.to_string(), "data.stats[2].metrics");
    }

    #[test]
    fn root_path_renders_as_dollar() {
        assert_eq!(Path::root().to_string(), "$");
        assert!(Path::root().is_root());
    }

    #[test]
    fn failure_display_includes_expected_and_actual() {
        let failure = ValidationFailure::new(
            ["a", "b"].into_iter().collect(),
            "number",
            json!("not-a-number"),
        );
        assert_eq!(
            failure.to_string(),
            "a.b: expected number, got string \"not-a-number\""
        );
    }

    #[test]
    fn empty_list_is_not_a_failure() {
        assert!(ValidationFailures::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn has_path_matches_exact_paths_only() {
        let failures = ValidationFailures::single(ValidationFailure::new(
            ["kids"].into_iter().collect::<Path>().child(1),
            "integer",
            json!(true),
        ));
        assert!(failures.has_path(&["kids", "1"]));
        assert!(!failures.has_path(&["kids"]));
    }

    #[test]
    fn long_strings_are_truncated_in_messages() {
        let failure = ValidationFailure::new(Path::root(), "number", json!("x".repeat(100)));
        assert!(failure.to_string().ends_with("...\""));
    }
}
