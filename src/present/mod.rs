//! # Presentation Module
//!
//! Read-side projections of stored submissions:
//! - display formatting of values and timestamps
//! - detail and table rows
//! - CSV export
//! - table view state (paging, sort toggle, debounced search)

mod export;
mod format;
mod table;

pub use export::{export_csv, ExportError, EXPORT_FILE_NAME};
pub use format::{
    detail_rows, format_timestamp, format_value, iso_timestamp, submission_title, DetailRow, EMPTY,
};
pub use table::{
    table_rows, total_label, TableRow, TableView, EMPTY_TABLE, PAGE_SIZES, SEARCH_DEBOUNCE,
};
