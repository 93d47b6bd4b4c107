//! Key-Value store wrapper with automatic serialization.

use crate::{CacheError, KeyValueStore};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Type-safe cache over any [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cloning is cheap and shares the
/// underlying store.
#[derive(Clone)]
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl Cache {
    /// Wrap a store.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wrap an already shared store.
    pub fn from_shared(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and
    /// [`CacheError::SerializeError`] if the stored bytes are not a valid `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("@RocketShoes:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("@RocketShoes:cart", &cart)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let bytes = serde_json::to_vec(value)?;
        self.store.set(key, &bytes)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

/// Helper to build cache keys with namespacing.
///
/// # Example
///
/// ```rust
/// let key = rocketshoes_cache::cache_key!("@RocketShoes", "cart");
/// assert_eq!(key, "@RocketShoes:cart");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}
