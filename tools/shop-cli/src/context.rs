//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use shop_browse::BrowseConfig;
use shop_cache::Cache;
use shop_commerce::cart::CartStore;
use shop_data::CatalogClient;

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

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

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        if let Some(path) = &config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Catalog client for the configured base URL.
    pub fn catalog(&self) -> Result<Arc<CatalogClient>> {
        let base_url = self.config.base_url();
        self.output.debug(&format!("Catalog at {}", base_url));

        let client = CatalogClient::new(&base_url)
            .and_then(|c| c.with_timeout(self.config.api.timeout()))
            .with_context(|| format!("Failed to create catalog client for {}", base_url))?;
        Ok(Arc::new(client))
    }

    /// Browse settings from the `[catalog]` section.
    pub fn browse_config(&self) -> BrowseConfig {
        BrowseConfig {
            per_page: self.config.catalog.per_page.max(1),
            debounce: Duration::from_millis(self.config.catalog.debounce_ms),
        }
    }

    /// Path of the cart store file.
    pub fn cart_path(&self) -> PathBuf {
        match &self.config.cart.path {
            Some(path) => self.resolve_path(path),
            None => data_dir().join("shop").join("cart.json"),
        }
    }

    /// Open the persisted cart.
    pub fn cart_store(&self) -> Result<CartStore> {
        let path = self.cart_path();
        self.output.debug(&format!("Cart store at {}", path.display()));

        let cache = Cache::open(&path)
            .with_context(|| format!("Failed to open cart store {}", path.display()))?;
        CartStore::open(cache, self.config.cart.storage_key.as_str())
            .with_context(|| format!("Failed to load cart from {}", path.display()))
    }

    /// Resolve a path relative to the working directory; `~/` means home.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = std::env::var_os("HOME") {
                return PathBuf::from(home).join(rest);
            }
        }

        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(&config_path) {
                    return Some((config, config_path));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("XDG_DATA_HOME") {
        PathBuf::from(dir)
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        std::env::temp_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_in(cwd: &Path, config: CliConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: cwd.to_path_buf(),
        }
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("shop.toml"), "[catalog]\nper_page = 4\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = find_config(&nested).unwrap();
        assert_eq!(config.catalog.per_page, 4);
        assert_eq!(path, dir.path().join("shop.toml"));
    }

    #[test]
    fn test_relative_cart_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.cart.path = Some("state/cart.json".into());

        let ctx = context_in(dir.path(), config);
        assert_eq!(ctx.cart_path(), dir.path().join("state").join("cart.json"));
    }

    #[test]
    fn test_cart_store_opens_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.cart.path = Some(dir.path().join("cart.json").display().to_string());

        let ctx = context_in(dir.path(), config);
        let store = ctx.cart_store().unwrap();
        assert!(store.cart().is_empty());
    }
}
