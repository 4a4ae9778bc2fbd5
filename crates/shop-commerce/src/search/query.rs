//! Browse query and sort options.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of products per page.
pub const DEFAULT_PER_PAGE: u32 = 8;

/// Sort direction sent to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Sort by newest first.
    Newest,
    /// Sort by oldest first.
    Oldest,
    /// Sort by price, low to high.
    #[default]
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
}

impl SortOption {
    /// Every option, in menu order.
    pub const ALL: [SortOption; 4] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::PriceLow,
        SortOption::PriceHigh,
    ];

    /// Field and direction sent to the catalog.
    pub fn sort_params(&self) -> (&'static str, SortOrder) {
        match self {
            SortOption::Newest => ("id", SortOrder::Desc),
            SortOption::Oldest => ("id", SortOrder::Asc),
            SortOption::PriceLow => ("price", SortOrder::Asc),
            SortOption::PriceHigh => ("price", SortOrder::Desc),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::PriceLow => "price-low",
            SortOption::PriceHigh => "price-high",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Newest => "Newest",
            SortOption::Oldest => "Oldest",
            SortOption::PriceLow => "Price: Low to High",
            SortOption::PriceHigh => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CommerceError::UnknownSortOption(s.to_string()))
    }
}

/// Everything needed to fetch one page of the catalog.
///
/// A non-empty search term takes precedence over the category; the two are
/// never combined in a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseQuery {
    /// Debounced search term. Empty means no search.
    pub search_term: String,
    /// Server-side category slug. Empty means all categories.
    pub category_slug: String,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseQuery {
    /// Create a query for the first page with default sorting.
    pub fn new() -> Self {
        Self {
            search_term: String::new(),
            category_slug: String::new(),
            sort: SortOption::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Set the category slug.
    pub fn with_category(mut self, slug: impl Into<String>) -> Self {
        self.category_slug = slug.into();
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination.
    pub fn with_pagination(mut self, page: u32, per_page: u32) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.max(1);
        self
    }

    /// Search term, if one is set.
    pub fn search(&self) -> Option<&str> {
        Some(self.search_term.trim()).filter(|t| !t.is_empty())
    }

    /// Category slug, if one is set and no search is active.
    pub fn category(&self) -> Option<&str> {
        if self.search().is_some() {
            return None;
        }
        Some(self.category_slug.as_str()).filter(|c| !c.is_empty())
    }

    /// Number of products to skip.
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}
