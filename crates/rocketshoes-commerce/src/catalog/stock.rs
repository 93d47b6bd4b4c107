//! Stock records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Maximum purchasable quantity for a product, as served by `GET /stock/{id}`.
///
/// Fetched per operation and never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    /// Product the record belongs to.
    pub id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl Stock {
    /// Create a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self { id, amount }
    }

    /// Check if `quantity` units can be placed in a cart.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.amount
    }
}
