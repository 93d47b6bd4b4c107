//! Type-safe key-value persistence layer for RocketShoes.
//!
//! Plays the part of browser local storage: a flat string-keyed store whose
//! values are JSON documents. Backends implement [`KeyValueStore`]; [`Cache`]
//! adds automatic serialization on top.
//!
//! # Example
//!
//! ```rust
//! use rocketshoes_cache::{cache_key, Cache, MemoryStore};
//!
//! let cache = Cache::new(MemoryStore::new());
//! let key = cache_key!("@RocketShoes", "cart");
//!
//! cache.set(&key, &vec![1, 2, 3]).unwrap();
//! let ids: Option<Vec<u32>> = cache.get(&key).unwrap();
//! assert_eq!(ids, Some(vec![1, 2, 3]));
//! ```

mod error;
mod kv;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore};
}
