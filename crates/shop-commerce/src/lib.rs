//! Domain types and logic for the storefront catalog client.
//!
//! This crate provides the types shared by the fetch layer, the browse
//! controller, and the CLI:
//!
//! - **Catalog**: Products, reviews, category labels and slugs
//! - **Cart**: Cart items keyed by product id, the persisted cart store
//! - **Search**: Sort options, browse queries, paged results, page windows
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_commerce::prelude::*;
//!
//! // Open the persisted cart and add a product
//! let mut store = CartStore::open(Cache::open("cart.json")?, "cart")?;
//! store.add(CartItem::new(product, 1))?;
//!
//! // Pagination controls for page 5 of 10
//! let markers = page_window(5, 10);
//! assert_eq!(markers.len(), 7);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod cart;
pub mod search;

pub use error::CommerceError;
pub use ids::ProductId;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        humanize_slug, CategoryIndex, Product, Review, ReviewUser, StarRating,
    };

    // Cart
    pub use crate::cart::{Cart, CartItem, CartStore, DEFAULT_CART_KEY};

    // Search
    pub use crate::search::{
        page_window, BrowseQuery, PageMarker, Pagination, ProductPage, SortOption, SortOrder,
    };

    pub use shop_cache::Cache;
}
