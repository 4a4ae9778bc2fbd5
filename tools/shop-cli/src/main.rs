//! Shop CLI - Browse a remote product catalog and manage a local cart.
//!
//! Commands:
//! - `shop products` - List products with search, category, sort, and paging
//! - `shop product` - Show one product in detail
//! - `shop categories` - List categories
//! - `shop cart` - Show and edit the cart
//! - `shop browse` - Interactive browsing session
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

use commands::{BrowseArgs, CartArgs, ConfigArgs, ProductArgs, ProductsArgs};

/// Shop CLI - Browse products and manage your cart
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show product details
    Product(ProductArgs),

    /// List product categories
    Categories,

    /// Show and edit the cart
    Cart(CartArgs),

    /// Browse the catalog interactively
    Browse(BrowseArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Categories => commands::products::categories(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Diagnostics go to stderr: warnings by default, debug with `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
