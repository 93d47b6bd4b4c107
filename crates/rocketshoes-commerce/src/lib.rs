//! Cart domain types for RocketShoes.
//!
//! This crate holds the pure data model shared by the storage, API and store
//! crates:
//!
//! - **Catalog**: `Product` as returned by the product API, `Stock` records
//! - **Cart**: the ordered, unique-by-id sequence of line items
//!
//! Nothing here performs I/O.
//!
//! # Example
//!
//! ```rust
//! use rocketshoes_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! let sneaker = Product::new(ProductId::new(1), "Tênis de Caminhada", 179.9, "https://img/1.jpg");
//! cart.push(sneaker.with_amount(1)).unwrap();
//! cart.set_amount(ProductId::new(1), 3).unwrap();
//!
//! assert_eq!(cart.item_count(), 3);
//! ```

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ids;

pub use cart::Cart;
pub use catalog::{Product, Stock};
pub use error::CommerceError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::Cart;
    pub use crate::catalog::{Product, Stock};
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;
}
