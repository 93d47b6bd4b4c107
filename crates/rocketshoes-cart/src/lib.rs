//! Stock-checked, persisted shopping cart store for RocketShoes.
//!
//! [`CartStore`] owns the cart for the lifetime of a session. It exposes
//! three mutations, each validated against live stock and committed as a
//! whole or not at all:
//!
//! | Operation | API calls | Failure notice |
//! |-----------|-----------|----------------|
//! | [`CartStore::add_product`] | stock, then product if new | "error adding product" |
//! | [`CartStore::remove_product`] | none | "error removing product" |
//! | [`CartStore::update_product_amount`] | stock | "error updating product quantity" |
//!
//! Requests above stock produce "requested quantity out of stock" instead.
//! Every committed change is written to the key-value store under a single
//! key as the JSON array of line items.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_cart::{CartStore, StoreConfig, TracingNotifier};
//! use rocketshoes_cache::{Cache, FileStore};
//! use rocketshoes_commerce::ProductId;
//! use rocketshoes_data::HttpCatalog;
//!
//! let store = CartStore::open(
//!     HttpCatalog::new("http://localhost:3333"),
//!     Cache::new(FileStore::open(".rocketshoes")?),
//!     TracingNotifier,
//!     StoreConfig::default(),
//! );
//!
//! store.add_product(ProductId::new(1)).await?;
//! println!("{} items", store.cart().item_count());
//! ```

mod config;
mod error;
mod notify;
mod store;

pub use config::{Concurrency, StoreConfig, DEFAULT_STORAGE_KEY, MAX_COMMIT_RETRIES};
pub use error::{CartOperation, StoreError};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use store::{CartStore, UpdateProductAmount};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartOperation, CartStore, Concurrency, Notice, Notifier, StoreConfig, StoreError,
        UpdateProductAmount,
    };
}
