//! Browse filters and load status.

use shop_commerce::search::SortOption;

/// Where the current product listing stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A query is in flight.
    Loading,
    /// The latest query succeeded.
    Ready,
    /// The latest query failed.
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    /// Error message, if the latest query failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// User-controlled browse filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseState {
    /// Search box contents as typed.
    pub search_input: String,
    /// Search term after debouncing; this is what gets queried.
    pub search_term: String,
    /// Selected category label; empty means all categories.
    pub category: String,
    /// Sort option.
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: u32,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            search_input: String::new(),
            search_term: String::new(),
            category: String::new(),
            sort: SortOption::default(),
            page: 1,
        }
    }
}

impl BrowseState {
    /// Restore every filter to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Check if any filter differs from the defaults.
    pub fn is_filtered(&self) -> bool {
        !self.search_term.is_empty() || !self.category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = BrowseState::default();
        assert_eq!(state.page, 1);
        assert_eq!(state.sort, SortOption::PriceLow);
        assert!(!state.is_filtered());
    }

    #[test]
    fn test_reset() {
        let mut state = BrowseState {
            search_input: "pho".into(),
            search_term: "phone".into(),
            category: "Laptops".into(),
            sort: SortOption::Newest,
            page: 4,
        };
        assert!(state.is_filtered());
        state.reset();
        assert_eq!(state, BrowseState::default());
    }

    #[test]
    fn test_status_error() {
        assert_eq!(LoadStatus::Failed("boom".into()).error(), Some("boom"));
        assert_eq!(LoadStatus::Ready.error(), None);
        assert!(LoadStatus::Loading.is_loading());
    }
}
