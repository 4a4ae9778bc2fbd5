//! Cart and cart item types.

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A product placed in the cart, with its quantity.
///
/// Serialized as the product's fields plus `quantity`, matching the shape the
/// cart has always been persisted in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    /// Units of this product in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Create a new cart item.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Product id this item is keyed by.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Discounted unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.discounted_price() * self.quantity
    }
}

/// A shopping cart: at most one item per product id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: HashMap<ProductId, CartItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the entry for the item's product id.
    pub fn insert(&mut self, item: CartItem) {
        self.items.insert(item.id(), item);
    }

    /// Remove the entry for `id`, returning it if present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        self.items.remove(&id)
    }

    /// Get an item by product id.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.get(&id)
    }

    /// Check whether a product is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.contains_key(&id)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Items sorted by product id, for stable display.
    pub fn items(&self) -> Vec<&CartItem> {
        let mut items: Vec<&CartItem> = self.items.values().collect();
        items.sort_by_key(|item| item.id());
        items
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of discounted line totals.
    pub fn subtotal(&self) -> Money {
        self.items
            .values()
            .map(CartItem::line_total)
            .sum()
    }
}
