//! Store configuration.

use serde::{Deserialize, Serialize};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Commit attempts per operation under [`Concurrency::Optimistic`].
pub const MAX_COMMIT_RETRIES: u32 = 3;

/// How commits from overlapping operations are reconciled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Concurrency {
    /// Each operation commits the candidate built from the snapshot it took
    /// when it started. Two overlapping operations may both pass the stock
    /// check, and the later commit replaces the earlier one.
    #[default]
    LastCommitWins,
    /// A commit is rejected if another commit landed since the operation's
    /// snapshot; the operation then restarts from a fresh snapshot, re-fetching
    /// stock, up to [`MAX_COMMIT_RETRIES`] times.
    Optimistic,
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the cart is persisted under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Commit reconciliation policy.
    #[serde(default)]
    pub concurrency: Concurrency,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            concurrency: Concurrency::default(),
        }
    }
}

impl StoreConfig {
    /// Persist under a different key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a different commit policy.
    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }
}
