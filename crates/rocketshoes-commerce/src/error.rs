//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised by pure cart mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// A line item for this product already exists.
    #[error("Duplicate line item for product {0}")]
    DuplicateItem(ProductId),

    /// Line item amounts must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),
}
