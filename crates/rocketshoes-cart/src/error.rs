//! Store error types.

use crate::notify::Notice;
use rocketshoes_commerce::{CommerceError, ProductId};
use rocketshoes_data::FetchError;
use std::fmt;
use thiserror::Error;

/// The mutation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Remove => write!(f, "remove"),
            Self::Update => write!(f, "update"),
        }
    }
}

/// Why a cart mutation was not committed.
///
/// By the time a caller sees one of these the matching [`Notice`] has already
/// been delivered; the cart is unchanged.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Requested amount exceeds the stock observed during the operation.
    #[error("Requested {requested} of product {product_id}, only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// The product has no line item in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Stock or product lookup failed.
    #[error("Catalog lookup failed: {0}")]
    Transport(#[from] FetchError),

    /// The candidate cart violated a cart invariant.
    #[error(transparent)]
    Cart(CommerceError),

    /// Other commits kept landing while the operation was in flight.
    #[error("Cart changed concurrently {attempts} times, giving up")]
    Conflict { attempts: u32 },
}

impl From<CommerceError> for StoreError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::ItemNotInCart(id) => StoreError::NotInCart(id),
            other => StoreError::Cart(other),
        }
    }
}

impl StoreError {
    /// The notice shown to the user when `op` fails with this error.
    pub fn notice(&self, op: CartOperation) -> Notice {
        match (self, op) {
            (StoreError::OutOfStock { .. }, _) => Notice::OutOfStock,
            (_, CartOperation::Add) => Notice::AddFailed,
            (_, CartOperation::Remove) => Notice::RemoveFailed,
            (_, CartOperation::Update) => Notice::UpdateFailed,
        }
    }
}
