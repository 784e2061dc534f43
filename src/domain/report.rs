//! Audience statistics report.
//!
//! The reporting service answers with a paginated list of per-audience
//! rows, each carrying a free-form map of metric values, wrapped in the
//! standard `{code, msg, extra, data}` envelope. The transform strips the
//! envelope, renames the wire's snake_case (and one stray camelCase) fields,
//! and derives a few aggregates for display.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::schema::{api_envelope, Schema, Shape};

pub type Metrics = BTreeMap<String, String>;

// -----------------------------------------------------------------------------
// Wire shape
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportResponseWire {
    pub code: i64,
    pub msg: String,
    #[serde(default)]
    pub extra: Option<BTreeMap<String, Value>>,
    pub data: ReportDataWire,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReportDataWire {
    pub stats: Vec<ItemStatWire>,
    pub statistics: Metrics,
    pub pagination: PaginationWire,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemStatWire {
    #[serde(rename = "custom_audience_coverNum")]
    pub custom_audience_cover_num: String,
    pub custom_audience_cover_num_by_app_aweme: String,
    pub custom_audience_cover_num_by_app_hotsoon: String,
    pub custom_audience_cover_num_by_app_toutiao: String,
    pub custom_audience_cover_num_by_app_xigua: String,
    pub custom_audience_id: String,
    pub custom_audience_name: String,
    pub metrics: Metrics,
    #[serde(default)]
    pub stat_time_day: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaginationWire {
    pub page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub total_page: u64,
}

static RESPONSE_SCHEMA: Lazy<Schema<ReportResponseWire>> = Lazy::new(|| {
    let item_stat = Shape::object([
        ("custom_audience_coverNum", Shape::String),
        ("custom_audience_cover_num_by_app_aweme", Shape::String),
        ("custom_audience_cover_num_by_app_hotsoon", Shape::String),
        ("custom_audience_cover_num_by_app_toutiao", Shape::String),
        ("custom_audience_cover_num_by_app_xigua", Shape::String),
        ("custom_audience_id", Shape::String),
        ("custom_audience_name", Shape::String),
        ("metrics", Shape::record(Shape::String)),
        ("stat_time_day", Shape::optional(Shape::String)),
    ]);
    let pagination = Shape::object([
        ("page", Shape::Unsigned),
        ("limit", Shape::Unsigned),
        ("total_count", Shape::Unsigned),
        ("total_page", Shape::Unsigned),
    ]);
    Schema::new(api_envelope(Shape::object([
        ("stats", Shape::array(item_stat)),
        ("statistics", Shape::record(Shape::String)),
        ("pagination", pagination),
    ])))
});

impl ReportResponseWire {
    pub fn schema() -> Schema<ReportResponseWire> {
        RESPONSE_SCHEMA.clone()
    }
}

// -----------------------------------------------------------------------------
// Internal shape
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStat {
    pub custom_audience_cover_num: String,
    pub custom_audience_cover_num_by_app_aweme: String,
    pub custom_audience_cover_num_by_app_hotsoon: String,
    pub custom_audience_cover_num_by_app_toutiao: String,
    pub custom_audience_cover_num_by_app_xigua: String,
    pub custom_audience_id: String,
    pub custom_audience_name: String,
    pub metrics: Metrics,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stat_time_day: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total_count: u64,
    pub total_page: u64,
}

impl Pagination {
    pub fn is_last_page(&self) -> bool {
        self.page >= self.total_page
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub stats: Vec<ItemStat>,
    /// Totals across every row.
    pub statistics: Metrics,
    pub pagination: Pagination,
}

impl Stats {
    /// Every metric key appearing in any row, sorted.
    pub fn metric_names(&self) -> Vec<String> {
        self.stats
            .iter()
            .flat_map(|s| s.metrics.keys().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// One metric across all rows, keyed by audience id. Rows without the
    /// metric are skipped.
    pub fn metric_column(&self, name: &str) -> Vec<(&str, &str)> {
        self.stats
            .iter()
            .filter_map(|s| {
                s.metrics
                    .get(name)
                    .map(|v| (s.custom_audience_id.as_str(), v.as_str()))
            })
            .collect()
    }
}

pub fn to_stats(wire: ReportResponseWire) -> Stats {
    let data = wire.data;
    Stats {
        stats: data.stats.into_iter().map(to_item_stat).collect(),
        statistics: data.statistics,
        pagination: Pagination {
            page: data.pagination.page,
            limit: data.pagination.limit,
            total_count: data.pagination.total_count,
            total_page: data.pagination.total_page,
        },
    }
}

fn to_item_stat(wire: ItemStatWire) -> ItemStat {
    ItemStat {
        custom_audience_cover_num: wire.custom_audience_cover_num,
        custom_audience_cover_num_by_app_aweme: wire.custom_audience_cover_num_by_app_aweme,
        custom_audience_cover_num_by_app_hotsoon: wire.custom_audience_cover_num_by_app_hotsoon,
        custom_audience_cover_num_by_app_toutiao: wire.custom_audience_cover_num_by_app_toutiao,
        custom_audience_cover_num_by_app_xigua: wire.custom_audience_cover_num_by_app_xigua,
        custom_audience_id: wire.custom_audience_id,
        custom_audience_name: wire.custom_audience_name,
        metrics: wire.metrics,
        stat_time_day: wire.stat_time_day,
    }
}

// -----------------------------------------------------------------------------
// Filters
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum CustomAudienceType {
    Exclude,
    Target,
}

impl From<CustomAudienceType> for i8 {
    fn from(kind: CustomAudienceType) -> Self {
        match kind {
            CustomAudienceType::Exclude => -1,
            CustomAudienceType::Target => 1,
        }
    }
}

impl TryFrom<i8> for CustomAudienceType {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(CustomAudienceType::Exclude),
            1 => Ok(CustomAudienceType::Target),
            other => Err(format!("unknown custom audience type {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRange {
    pub st: f64,
    pub et: f64,
    pub is_int: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub st: String,
    pub et: String,
    pub is_compare: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalFilters {
    pub dmp_ids: Vec<String>,
    pub ad_ids: Vec<String>,
    pub custom_audience_type: CustomAudienceType,
    pub date_range: DateRange,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cost: Option<FilterRange>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub convert_cnt: Option<FilterRange>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delivery_type: Option<String>,
}

pub const DEFAULT_SORT_STAT: &str = "stat_cost";

/// A report request: filters, the metric fields to return, and the sort key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportQuery {
    #[serde(flatten)]
    pub filters: GlobalFilters,
    pub fields: Vec<String>,
    pub sort_stat: String,
}

impl ReportQuery {
    pub fn new(filters: GlobalFilters) -> Self {
        Self {
            filters,
            fields: Vec::new(),
            sort_stat: DEFAULT_SORT_STAT.to_string(),
        }
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort_stat(mut self, sort_stat: impl Into<String>) -> Self {
        self.sort_stat = sort_stat.into();
        self
    }
}
