//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rocketshoes_cache::cache_key;
use rocketshoes_cart::{Concurrency, StoreConfig};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, in the working directory and its parents.
pub const CONFIG_NAMES: [&str; 3] = ["rocketshoes.toml", ".rocketshoes.toml", "rocketshoes.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Product API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart store settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Key the cart is stored under.
    pub fn storage_key(&self) -> String {
        cache_key!(self.storage.namespace.as_str(), "cart")
    }

    /// Settings for the cart store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .with_storage_key(self.storage_key())
            .with_concurrency(self.cart.concurrency)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Product API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL serving `/stock/{id}` and `/products/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in milliseconds. Unset means wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: None,
        }
    }
}

impl ApiConfig {
    /// Request timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Local storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding stored keys, relative to the working directory.
    #[serde(default = "default_storage_dir")]
    pub dir: String,

    /// Prefix of every storage key.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_storage_dir() -> String {
    ".rocketshoes".to_string()
}

fn default_namespace() -> String {
    "@RocketShoes".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            namespace: default_namespace(),
        }
    }
}

/// Cart store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// How overlapping cart operations are reconciled.
    #[serde(default)]
    pub concurrency: Concurrency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.storage_key(), "@RocketShoes:cart");
        assert_eq!(config.cart.concurrency, Concurrency::LastCommitWins);
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://api.test"
            timeout_ms = 1500

            [cart]
            concurrency = "optimistic"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://api.test");
        assert_eq!(config.api.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(config.storage.dir, ".rocketshoes");

        let store = config.store_config();
        assert_eq!(store.concurrency, Concurrency::Optimistic);
        assert_eq!(store.storage_key, "@RocketShoes:cart");
    }

    #[test]
    fn test_namespace_changes_key() {
        let mut config = CliConfig::default();
        config.storage.namespace = "@Demo".to_string();
        assert_eq!(config.store_config().storage_key, "@Demo:cart");
    }

    #[test]
    fn test_save_and_load_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.api.timeout_ms = Some(250);

        for name in ["rocketshoes.toml", "rocketshoes.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(CliConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rocketshoes.toml");
        std::fs::write(&path, "api = 3").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("rocketshoes.toml"));
    }
}
