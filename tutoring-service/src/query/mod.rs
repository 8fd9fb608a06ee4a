//! Filtered, sorted and paginated reads shared by every list endpoint.

pub mod filter;
pub mod pagination;
pub mod sort;

pub use filter::{like_pattern, Filter, ListQuery, Predicate, RelatedSearch, SearchSpec, Value};
pub use pagination::{Page, PageRequest, PaginationMeta};
pub use sort::{Sort, SortField, SortOrder};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid sort order '{0}', expected 'asc' or 'desc'")]
    InvalidSortOrder(String),
}
