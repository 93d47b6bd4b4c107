//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rocketshoes_cache::{Cache, FileStore};
use rocketshoes_cart::CartStore;
use rocketshoes_data::HttpCatalog;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// The store type every cart command works with.
pub type Store = CartStore<HttpCatalog, Output>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where the configuration came from, if a file was found.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = PathBuf::from(path);
                (CliConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (CliConfig::load(&path)?, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Directory backing local storage.
    pub fn storage_dir(&self) -> PathBuf {
        self.cwd.join(&self.config.storage.dir)
    }

    /// Open the cart store described by the configuration.
    pub fn open_store(&self) -> Result<Store> {
        let dir = self.storage_dir();
        let storage = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))?;

        let catalog =
            HttpCatalog::new(&self.config.api.base_url).with_timeout(self.config.api.timeout());

        self.output.debug(&format!(
            "api={} storage={} key={}",
            self.config.api.base_url,
            dir.display(),
            self.config.storage_key()
        ));

        Ok(CartStore::open(
            catalog,
            Cache::new(storage),
            self.output.clone(),
            self.config.store_config(),
        ))
    }
}

/// Find a config file in `start` or any of its parents.
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_in_parent() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("rocketshoes.toml"), "").unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, root.path().join("rocketshoes.toml"));
    }

    #[test]
    fn test_find_config_prefers_nearest() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("shop");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join("rocketshoes.toml"), "").unwrap();
        std::fs::write(nested.join(".rocketshoes.toml"), "").unwrap();

        assert_eq!(find_config(&nested).unwrap(), nested.join(".rocketshoes.toml"));
    }
}
