//! Commerce error types.

use thiserror::Error;

/// Errors from parsing catalog input and mutating the cart.
#[derive(Error, Debug)]
pub enum CommerceError {
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    #[error("Invalid product id: {0}")]
    InvalidProductId(String),

    #[error("Unknown sort option: {0}")]
    UnknownSortOption(String),

    /// The cart store could not be read or written.
    #[error("Cart storage error: {0}")]
    Storage(#[from] shop_cache::CacheError),
}
