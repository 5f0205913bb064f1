//! # List Engine
//!
//! filter → sort → paginate over a submission slice.

use serde::Serialize;

use super::filter::SearchFilter;
use super::params::{normalize_search, ListParams, SortOrder, SORT_BY};
use crate::storage::Submission;

/// One page of submissions plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage {
    pub page: usize,
    pub limit: usize,
    /// Matching submissions across all pages
    pub total: usize,
    /// At least 1, even when nothing matches
    pub total_pages: usize,
    pub sort_by: &'static str,
    pub sort_order: SortOrder,
    pub submissions: Vec<Submission>,
}

/// Filters by search term and sorts by createdAt.
///
/// The sort is stable: equal timestamps keep their input order.
pub fn filter_and_sort<'a>(
    items: &'a [Submission],
    search: Option<&str>,
    order: SortOrder,
) -> Vec<&'a Submission> {
    let filter = normalize_search(search).map(|term| SearchFilter::new(&term));

    let mut matched: Vec<&Submission> = items
        .iter()
        .filter(|s| filter.as_ref().map_or(true, |f| f.matches(s)))
        .collect();

    match order {
        SortOrder::Asc => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortOrder::Desc => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    matched
}

/// Runs a list query
pub fn list(items: &[Submission], params: &ListParams) -> ListPage {
    let matched = filter_and_sort(items, params.search.as_deref(), params.sort_order);

    let total = matched.len();
    let total_pages = total.div_ceil(params.limit).max(1);
    let submissions = matched
        .into_iter()
        .skip(params.offset())
        .take(params.limit)
        .cloned()
        .collect();

    ListPage {
        page: params.page,
        limit: params.limit,
        total,
        total_pages,
        sort_by: SORT_BY,
        sort_order: params.sort_order,
        submissions,
    }
}
