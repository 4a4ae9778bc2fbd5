//! Persisted cart store.

use crate::cart::{Cart, CartItem};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use shop_cache::Cache;

/// Storage key the cart record lives under.
pub const DEFAULT_CART_KEY: &str = "cart";

/// The cart plus the store it is persisted to.
///
/// Every mutation writes the whole cart before the in-memory copy is
/// replaced, so a failed write leaves the store and the cart unchanged.
#[derive(Debug)]
pub struct CartStore {
    cache: Cache,
    key: String,
    cart: Cart,
}

impl CartStore {
    /// Load the cart stored under `key`, or start empty.
    pub fn open(cache: Cache, key: impl Into<String>) -> Result<Self, CommerceError> {
        let key = key.into();
        let cart = cache.get::<Cart>(&key)?.unwrap_or_default();
        tracing::debug!(key = %key, items = cart.len(), "cart loaded");
        Ok(Self { cache, key, cart })
    }

    /// Current cart contents.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Get an item by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.cart.get(id)
    }

    /// Insert or overwrite the entry for the item's product.
    pub fn add(&mut self, item: CartItem) -> Result<(), CommerceError> {
        self.commit(|cart| cart.insert(item))
    }

    /// Overwrite the entry for `product` with `quantity`.
    ///
    /// A quantity of zero removes the entry.
    pub fn set_quantity(&mut self, product: Product, quantity: u32) -> Result<(), CommerceError> {
        if quantity == 0 {
            return self.remove(product.id);
        }
        self.add(CartItem::new(product, quantity))
    }

    /// Delete the entry for `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: ProductId) -> Result<(), CommerceError> {
        if !self.cart.contains(id) {
            return Ok(());
        }
        self.commit(|cart| {
            cart.remove(id);
        })
    }

    /// Add one unit of a product already in the cart.
    pub fn increment(&mut self, id: ProductId) -> Result<u32, CommerceError> {
        let item = self
            .cart
            .get(id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        let quantity = item
            .quantity
            .checked_add(1)
            .ok_or(CommerceError::InvalidQuantity(i64::from(item.quantity) + 1))?;
        self.set_quantity(item.product.clone(), quantity)?;
        Ok(quantity)
    }

    /// Remove one unit of a product; the entry goes away at zero.
    pub fn decrement(&mut self, id: ProductId) -> Result<u32, CommerceError> {
        let item = self
            .cart
            .get(id)
            .ok_or_else(|| CommerceError::ItemNotInCart(id.to_string()))?;
        let quantity = item.quantity.saturating_sub(1);
        self.set_quantity(item.product.clone(), quantity)?;
        Ok(quantity)
    }

    /// Empty the cart and drop its stored record.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cache.delete(&self.key)?;
        self.cart.clear();
        tracing::info!(key = %self.key, "cart cleared");
        Ok(())
    }

    fn commit(&mut self, mutate: impl FnOnce(&mut Cart)) -> Result<(), CommerceError> {
        let mut next = self.cart.clone();
        mutate(&mut next);
        self.cache.set(&self.key, &next)?;
        self.cart = next;
        tracing::info!(key = %self.key, items = self.cart.len(), "cart saved");
        Ok(())
    }
}
