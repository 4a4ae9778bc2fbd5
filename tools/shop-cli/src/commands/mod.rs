//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod config;
pub mod product;
pub mod products;

use clap::{Args, Subcommand};
use shop_commerce::search::SortOption;
use shop_commerce::ProductId;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Search term (takes precedence over --category).
    #[arg(short, long)]
    pub search: Option<String>,

    /// Category, by display label or slug.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort order: newest, oldest, price-low, price-high.
    #[arg(long, default_value = "price-low")]
    pub sort: SortOption,

    /// Page to show (1-indexed).
    #[arg(short, long, default_value = "1")]
    pub page: u32,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: ProductId,

    /// Number of reviews to show.
    #[arg(long, default_value = "3")]
    pub reviews: usize,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List cart contents.
    List,
    /// Add a product (replaces any existing entry).
    Add {
        /// Product ID.
        id: ProductId,
        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },
    /// Set the quantity of a product; 0 removes it.
    Set {
        /// Product ID.
        id: ProductId,
        /// New quantity.
        quantity: u32,
    },
    /// Add one unit of a product already in the cart.
    Inc {
        /// Product ID.
        id: ProductId,
    },
    /// Remove one unit of a product.
    Dec {
        /// Product ID.
        id: ProductId,
    },
    /// Remove a product.
    Remove {
        /// Product ID.
        id: ProductId,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Initial search term.
    #[arg(short, long)]
    pub search: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
