//! Type-safe local key-value storage for the storefront client.
//!
//! Provides a small, ergonomic API for keeping client state (the cart) in a
//! JSON file on disk, with automatic serialization of stored values.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_cache::Cache;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Cart {
//!     items: Vec<CartItem>,
//! }
//!
//! let cache = Cache::open("~/.local/share/shop/state.json")?;
//!
//! // Store a value
//! cache.set("cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<Cart> = cache.get("cart")?;
//!
//! // Delete a value
//! cache.delete("cart")?;
//! ```

mod error;
mod kv;

pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError};
}
