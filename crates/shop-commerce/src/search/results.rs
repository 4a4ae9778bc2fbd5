//! Paged results and pagination.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One page of products as returned by the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductPage {
    /// The products on this page.
    pub products: Vec<Product>,
    /// Total number of matching products.
    pub total: u32,
    /// Number of products skipped.
    pub skip: u32,
    /// Page size the server applied.
    pub limit: u32,
}

impl ProductPage {
    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get number of products in this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }
}

/// A pagination control: a page number or a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => f.write_str("..."),
        }
    }
}

/// Page controls for `current` out of `total` pages.
///
/// Up to four pages are listed in full. Beyond that the first and last page
/// are always shown around a three-page window, with gaps marked by
/// [`PageMarker::Ellipsis`]; at most seven markers are produced.
pub fn page_window(current: u32, total: u32) -> Vec<PageMarker> {
    if total <= 4 {
        return (1..=total).map(PageMarker::Page).collect();
    }

    let (start, end) = if current <= 2 {
        (2, 4.min(total - 1))
    } else if current >= total - 1 {
        ((total - 3).max(2), total - 1)
    } else {
        (current - 1, current + 1)
    };

    let mut markers = Vec::with_capacity(7);
    markers.push(PageMarker::Page(1));
    if start > 2 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.extend((start..=end).map(PageMarker::Page));
    if end < total - 1 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total));
    markers
}

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items.
    pub total: u32,
    /// Total number of pages; zero when there are no items.
    pub total_pages: u32,
    /// Whether there's a next page.
    pub has_next: bool,
    /// Whether there's a previous page.
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info.
    pub fn new(page: u32, per_page: u32, total: u32) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total.div_ceil(per_page);

        Self {
            page,
            per_page,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Page controls for the current position.
    pub fn window(&self) -> Vec<PageMarker> {
        page_window(self.page, self.total_pages)
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            (self.page - 1) * self.per_page + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u32 {
        (self.page * self.per_page).min(self.total)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::DEFAULT_PER_PAGE, 0)
    }
}
