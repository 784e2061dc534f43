//! HackerNews item - wire schema and the internal record it becomes.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::brands::Url;
use crate::domain::schema::{Schema, Shape};

/// Item exactly as the HackerNews API returns it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HackerNewsWire {
    pub by: String,
    pub descendants: u64,
    pub id: u64,
    pub kids: Vec<u64>,
    pub score: i64,
    pub time: i64,
    pub title: Url,
    #[serde(rename = "type")]
    pub kind: String,
    pub url: Url,
}

static WIRE_SCHEMA: Lazy<Schema<HackerNewsWire>> = Lazy::new(|| {
    Schema::new(Shape::object([
        ("by", Shape::String),
        ("descendants", Shape::Unsigned),
        ("id", Shape::Unsigned),
        ("kids", Shape::array(Shape::Unsigned)),
        ("score", Shape::Integer),
        ("time", Shape::Integer),
        ("title", Url::shape()),
        ("type", Shape::String),
        ("url", Url::shape()),
    ]))
});

impl HackerNewsWire {
    pub fn schema() -> Schema<HackerNewsWire> {
        WIRE_SCHEMA.clone()
    }
}

/// Item as the rest of the application consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HackerNewsItem {
    pub id: u64,
    pub author: String,
    pub comment_count: u64,
    pub child_ids: Vec<u64>,
    pub score: i64,
    pub posted_at: DateTime<Utc>,
    pub title: Url,
    pub kind: String,
    pub url: Url,
}

static ITEM_SCHEMA: Lazy<Schema<HackerNewsItem>> = Lazy::new(|| {
    Schema::new(Shape::exact_object([
        ("id", Shape::Unsigned),
        ("author", Shape::String),
        ("comment_count", Shape::Unsigned),
        ("child_ids", Shape::array(Shape::Unsigned)),
        ("score", Shape::Integer),
        ("posted_at", Shape::String),
        ("title", Url::shape()),
        ("kind", Shape::String),
        ("url", Url::shape()),
    ]))
});

impl HackerNewsItem {
    /// Schema for persisting the internal record.
    pub fn schema() -> Schema<HackerNewsItem> {
        ITEM_SCHEMA.clone()
    }
}

/// Wire item to internal record. Unrepresentable timestamps fall back to the
/// epoch so the transform stays total.
pub fn to_item(wire: HackerNewsWire) -> HackerNewsItem {
    let posted_at = DateTime::<Utc>::from_timestamp(wire.time, 0).unwrap_or_default();
    HackerNewsItem {
        id: wire.id,
        author: wire.by,
        comment_count: wire.descendants,
        child_ids: wire.kids,
        score: wire.score,
        posted_at,
        title: wire.title,
        kind: wire.kind,
        url: wire.url,
    }
}
