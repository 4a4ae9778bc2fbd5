//! Catalog browsing for the storefront client.
//!
//! Holds the browse state machine that turns filter, sort, search, and page
//! changes into catalog queries, plus the debouncer that paces search input.
//!
//! - **Debouncer**: trailing-edge emission of the last value after a quiet period
//! - **BrowseController**: filters, pagination, and last-issued-wins query handling
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_browse::{BrowseConfig, BrowseController};
//! use shop_data::CatalogClient;
//! use std::sync::Arc;
//!
//! let mut browse = BrowseController::new(Arc::new(CatalogClient::from_env()?), BrowseConfig::default());
//! browse.load();
//!
//! browse.set_search_input("phone");
//! while let Some(event) = browse.next_event().await {
//!     println!("{event:?}: {}", browse.summary());
//! }
//! ```

mod controller;
mod debounce;
mod state;

pub use controller::{BrowseConfig, BrowseController, BrowseEvent};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use state::{BrowseState, LoadStatus};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{BrowseConfig, BrowseController, BrowseEvent, Debouncer, LoadStatus};
}
