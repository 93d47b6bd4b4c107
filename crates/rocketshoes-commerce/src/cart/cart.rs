//! Cart type.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Serializes as a bare JSON array of line items, which is the persisted
/// layout.
///
/// ## Invariants
/// - Items are unique by `id`
/// - Every item has `amount >= 1`; an item is removed rather than set to 0
/// - Insertion order is preserved
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from line items, validating the invariants.
    pub fn from_items(items: Vec<Product>) -> Result<Self, CommerceError> {
        let mut cart = Self::new();
        for item in items {
            cart.push(item)?;
        }
        Ok(cart)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Get a line item by product ID.
    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|i| i.id == product_id)
    }

    /// Check if the product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Amount of the product currently in the cart, zero if absent.
    pub fn amount_of(&self, product_id: ProductId) -> i64 {
        self.get(product_id).map_or(0, |i| i.amount)
    }

    /// Number of distinct line items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units in the cart (sum of amounts, saturating).
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, i| count.saturating_add(i.amount))
    }

    /// Sum of line subtotals. Items without a numeric price are skipped.
    pub fn total(&self) -> f64 {
        self.items.iter().filter_map(Product::subtotal).sum()
    }

    /// Append a new line item.
    pub fn push(&mut self, item: Product) -> Result<(), CommerceError> {
        if item.amount < 1 {
            return Err(CommerceError::InvalidQuantity(item.amount));
        }
        if self.contains(item.id) {
            return Err(CommerceError::DuplicateItem(item.id));
        }
        self.items.push(item);
        Ok(())
    }

    /// Set the amount of an existing line item.
    pub fn set_amount(&mut self, product_id: ProductId, amount: i64) -> Result<(), CommerceError> {
        if amount < 1 {
            return Err(CommerceError::InvalidQuantity(amount));
        }
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        item.amount = amount;
        Ok(())
    }

    /// Remove a line item, keeping the others in order.
    pub fn remove(&mut self, product_id: ProductId) -> Result<Product, CommerceError> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        Ok(self.items.remove(index))
    }
}
