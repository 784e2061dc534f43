//! Branded refinements - strings narrowed by an extra rule.
//!
//! A brand exists at two levels: a [`Shape::Refined`] used inside schemas,
//! and a newtype whose only constructors apply the same rule. Deserializing
//! the newtype re-runs the rule, so a checked value can never be fabricated.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::schema::Shape;

/// Brand name used in failure descriptions.
pub const URL_BRAND: &str = "Url";

/// An absolute `http`/`https` URL with a real host.
///
/// Accepted when the `url` crate parses the text, the scheme is `http` or
/// `https`, and the host is either an IP address or a domain with at least
/// one dot (`https://a.co` passes, `https://localhost` does not).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Url(String);

impl Url {
    pub fn parse(text: &str) -> Result<Self, InvalidUrl> {
        if is_valid_url(text) {
            Ok(Self(text.to_string()))
        } else {
            Err(InvalidUrl(text.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The refinement used by schemas.
    pub fn shape() -> Shape {
        Shape::refine(URL_BRAND, Shape::String, |value: &Value| {
            value.as_str().map(is_valid_url).unwrap_or(false)
        })
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Url {
    type Error = InvalidUrl;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_url(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidUrl(value))
        }
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.0
    }
}

/// Text rejected by the URL refinement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a valid http(s) URL: {0}")]
pub struct InvalidUrl(pub String);

fn is_valid_url(text: &str) -> bool {
    let parsed = match url::Url::parse(text) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    match parsed.host() {
        Some(url::Host::Domain(domain)) => {
            domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        Some(url::Host::Ipv4(_)) | Some(url::Host::Ipv6(_)) => true,
        None => false,
    }
}
