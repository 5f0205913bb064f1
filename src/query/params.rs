//! # List Parameter Parser
//!
//! Turns raw `page` / `limit` / `sortOrder` / `q` strings into normalized
//! list parameters. Parsing never fails: bad input falls back to defaults.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Maximum page size
pub const MAX_LIMIT: usize = 100;

/// Page size when none (or a non-positive one) is given
pub const DEFAULT_LIMIT: usize = 10;

/// The only sortable column
pub const SORT_BY: &str = "createdAt";

/// Direction of the createdAt sort
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// `asc` selects ascending; anything else is descending
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// The other direction
    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Query-string form of the list parameters, all optional and unparsed
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub sort_order: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
}

/// Normalized list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    /// 1-based page number, at least 1
    pub page: usize,
    /// Page size in `1..=MAX_LIMIT`
    pub limit: usize,
    pub sort_order: SortOrder,
    /// Search term; `None` when absent or blank
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_order: SortOrder::Desc,
            search: None,
        }
    }
}

impl ListParams {
    /// Builds normalized parameters from numeric input
    pub fn new(page: i64, limit: i64, sort_order: SortOrder, search: Option<String>) -> Self {
        Self {
            page: normalize_page(page),
            limit: normalize_limit(limit),
            sort_order,
            search: normalize_search(search.as_deref()),
        }
    }

    /// Parses raw query-string values
    pub fn parse(raw: &RawListQuery) -> Self {
        let page = raw.page.as_deref().and_then(parse_int).unwrap_or(1);
        let limit = raw
            .limit
            .as_deref()
            .and_then(parse_int)
            .unwrap_or(DEFAULT_LIMIT as i64);
        let sort_order = raw
            .sort_order
            .as_deref()
            .map(SortOrder::parse)
            .unwrap_or_default();

        Self::new(page, limit, sort_order, raw.q.clone())
    }

    /// Index of the first item on this page
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Pages below 1 clamp to 1
pub fn normalize_page(page: i64) -> usize {
    if page < 1 {
        1
    } else {
        usize::try_from(page).unwrap_or(usize::MAX)
    }
}

/// Limits below 1 fall back to the default; limits above the max are capped
pub fn normalize_limit(limit: i64) -> usize {
    if limit < 1 {
        DEFAULT_LIMIT
    } else {
        usize::try_from(limit).unwrap_or(MAX_LIMIT).min(MAX_LIMIT)
    }
}

/// Trims a search term; blank terms mean no search
pub fn normalize_search(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_string)
}

fn parse_int(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}
