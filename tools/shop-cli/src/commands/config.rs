//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    let config = &ctx.config;
    let base_url = config.base_url();
    let cart_path = ctx.cart_path();

    if ctx.output.is_json() {
        let mut value = serde_json::to_value(config)?;
        value["effective"] = serde_json::json!({
            "base_url": base_url,
            "cart_path": cart_path,
        });
        ctx.output.json(&value);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }

    // API section
    ctx.output.info("");
    ctx.output.info("[api]");
    ctx.output.kv("base_url", &base_url);
    if config.api.base_url.as_deref() != Some(base_url.as_str()) {
        ctx.output.kv(
            "source",
            if std::env::var_os(shop_data::BASE_URL_ENV).is_some() {
                shop_data::BASE_URL_ENV
            } else {
                "default"
            },
        );
    }
    ctx.output.kv("timeout_secs", &config.api.timeout_secs.to_string());

    // Catalog section
    ctx.output.info("");
    ctx.output.info("[catalog]");
    ctx.output.kv("per_page", &config.catalog.per_page.to_string());
    ctx.output.kv("debounce_ms", &config.catalog.debounce_ms.to_string());

    // Cart section
    ctx.output.info("");
    ctx.output.info("[cart]");
    ctx.output.kv("path", &cart_path.display().to_string());
    ctx.output.kv("storage_key", &config.cart.storage_key);

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("shop.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}
