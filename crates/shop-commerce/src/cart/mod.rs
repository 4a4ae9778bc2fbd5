//! Shopping cart module.
//!
//! Contains the cart, its items, and the store that persists them.

mod cart;
mod store;

pub use cart::{Cart, CartItem};
pub use store::{CartStore, DEFAULT_CART_KEY};
