//! Catalog module.
//!
//! Contains the product and stock shapes served by the product API.

mod product;
mod stock;

pub use product::Product;
pub use stock::Stock;
