//! Search module.
//!
//! Contains sort options, browse queries, paged results, and page windows.

mod query;
mod results;

pub use query::{BrowseQuery, SortOption, SortOrder, DEFAULT_PER_PAGE};
pub use results::{page_window, PageMarker, Pagination, ProductPage};
