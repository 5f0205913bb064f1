//! # Query Module
//!
//! Search, sort and paginate over the submission collection.

pub mod engine;
pub mod filter;
pub mod params;

pub use engine::{filter_and_sort, list, ListPage};
pub use filter::SearchFilter;
pub use params::{
    normalize_search, ListParams, RawListQuery, SortOrder, DEFAULT_LIMIT, MAX_LIMIT, SORT_BY,
};
