//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shop_commerce::cart::DEFAULT_CART_KEY;
use shop_commerce::search::DEFAULT_PER_PAGE;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing settings.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Cart storage settings.
    #[serde(default)]
    pub cart: CartConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
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

    /// Base URL after applying `SHOP_API_BASE_URL`.
    pub fn base_url(&self) -> String {
        shop_data::base_url_from_env(self.api.base_url.as_deref())
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Catalog API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Catalog base URL; the built-in default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    shop_data::DEFAULT_TIMEOUT.as_secs()
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Listing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Products per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Search debounce delay in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

fn default_debounce_ms() -> u64 {
    shop_browse::DEFAULT_DEBOUNCE.as_millis() as u64
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Cart storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Store file; defaults to the user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Key the cart is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            path: None,
            storage_key: default_storage_key(),
        }
    }
}

/// Generate a default shop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Shop CLI configuration

[api]
# base_url = "{base_url}"
timeout_secs = {timeout}

[catalog]
per_page = {per_page}
debounce_ms = {debounce}

[cart]
# path = "~/.local/share/shop/cart.json"
storage_key = "{key}"
"#,
        base_url = shop_data::DEFAULT_BASE_URL,
        timeout = default_timeout_secs(),
        per_page = default_per_page(),
        debounce = default_debounce_ms(),
        key = default_storage_key(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.catalog.per_page, 8);
        assert_eq!(config.catalog.debounce_ms, 500);
        assert_eq!(config.cart.storage_key, "cart");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:8080/products"

            [catalog]
            per_page = 12
            "#,
        )
        .unwrap();
        assert_eq!(
            config.api.base_url.as_deref(),
            Some("http://localhost:8080/products")
        );
        assert_eq!(config.catalog.per_page, 12);
        assert_eq!(config.catalog.debounce_ms, 500);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");

        let mut config = CliConfig::default();
        config.cart.path = Some("/tmp/cart.json".into());
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(&path, "[catalog]\nper_page = \"many\"").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse TOML config"));
    }
}
