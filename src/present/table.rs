//! Submissions table: row projection and view state.
//!
//! `TableView` holds what the table page controls (page, limit, sort order,
//! search box) and turns it into `ListParams`. Search input is debounced:
//! the term only reaches the query once it has been stable for
//! `SEARCH_DEBOUNCE`.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::format::format_timestamp;
use crate::query::{ListPage, ListParams, SortOrder, DEFAULT_LIMIT, MAX_LIMIT};
use crate::storage::Submission;

/// Delay between the last keystroke and the search taking effect
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Page sizes offered by the table
pub const PAGE_SIZES: [usize; 3] = [10, 20, 50];

/// Shown when a page has no rows
pub const EMPTY_TABLE: &str = "No submissions yet. Complete the form to create the first record.";

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub id: String,
    pub short_id: String,
    pub created: String,
}

impl TableRow {
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            id: submission.id.clone(),
            short_id: submission.short_id().to_string(),
            created: format_timestamp(&submission.created_at),
        }
    }
}

pub fn table_rows(submissions: &[Submission]) -> Vec<TableRow> {
    submissions.iter().map(TableRow::from_submission).collect()
}

/// `"25 total submissions"` / `"1 total submission"`
pub fn total_label(total: usize) -> String {
    format!(
        "{} total submission{}",
        total,
        if total == 1 { "" } else { "s" }
    )
}

#[derive(Debug, Clone)]
struct PendingSearch {
    term: String,
    typed_at: Instant,
}

/// Page, page size, sort and search state of the table
#[derive(Debug, Clone)]
pub struct TableView {
    page: usize,
    limit: usize,
    sort_order: SortOrder,
    search_input: String,
    search: String,
    pending: Option<PendingSearch>,
    total: usize,
    total_pages: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            sort_order: SortOrder::Desc,
            search_input: String::new(),
            search: String::new(),
            pending: None,
            total: 0,
            total_pages: 1,
        }
    }
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    /// View state for an incoming list query; the search is already settled
    pub fn from_params(params: &ListParams) -> Self {
        let search = params.search.clone().unwrap_or_default();
        Self {
            page: params.page,
            limit: params.limit,
            sort_order: params.sort_order,
            search_input: search.clone(),
            search,
            ..Self::default()
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Raw text in the search box
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Term currently applied to the query
    pub fn active_search(&self) -> &str {
        &self.search
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Changes the page size and returns to page 1
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self.page = 1;
    }

    /// Flips the created-at sort and returns to page 1
    pub fn toggle_sort(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.page = 1;
    }

    /// Records a keystroke in the search box; resets to page 1
    pub fn type_search(&mut self, input: impl Into<String>, now: Instant) {
        let input = input.into();
        self.pending = Some(PendingSearch {
            term: input.trim().to_string(),
            typed_at: now,
        });
        self.search_input = input;
        self.page = 1;
    }

    /// Applies the pending search once it has been stable long enough.
    ///
    /// Returns true when the active term changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let ready = match &self.pending {
            Some(pending) => now.saturating_duration_since(pending.typed_at) >= SEARCH_DEBOUNCE,
            None => false,
        };
        if !ready {
            return false;
        }
        match self.pending.take() {
            Some(pending) if pending.term != self.search => {
                self.search = pending.term;
                true
            }
            _ => false,
        }
    }

    pub fn prev(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    pub fn next(&mut self) {
        self.page = (self.page + 1).min(self.total_pages);
    }

    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    pub fn can_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Query for the current state
    pub fn params(&self) -> ListParams {
        let search = if self.search.is_empty() {
            None
        } else {
            Some(self.search.clone())
        };
        ListParams {
            page: self.page,
            limit: self.limit,
            sort_order: self.sort_order,
            search,
        }
    }

    /// Records totals from a fetched page
    pub fn apply(&mut self, page: &ListPage) {
        self.total = page.total;
        self.total_pages = page.total_pages.max(1);
        self.page = self.page.min(self.total_pages);
    }

    /// Footer text, e.g. `Page 1 of 3`
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}
