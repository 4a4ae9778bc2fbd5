//! Cart commands.

use anyhow::{bail, Context as _, Result};
use dialoguer::Confirm;
use serde_json::json;
use shop_commerce::cart::{CartItem, CartStore};
use shop_commerce::ProductId;
use shop_data::CatalogSource;

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;

    match args.command.unwrap_or(CartCommand::List) {
        CartCommand::List => {}
        CartCommand::Add { id, quantity } => add(&mut store, id, quantity, ctx).await?,
        CartCommand::Set { id, quantity } => set(&mut store, id, quantity, ctx)?,
        CartCommand::Inc { id } => {
            let quantity = store.increment(id)?;
            ctx.output.success(&format!("Product {} quantity is now {}", id, quantity));
        }
        CartCommand::Dec { id } => {
            let quantity = store.decrement(id)?;
            if quantity == 0 {
                ctx.output.success(&format!("Removed product {}", id));
            } else {
                ctx.output.success(&format!("Product {} quantity is now {}", id, quantity));
            }
        }
        CartCommand::Remove { id } => {
            if store.get(id).is_none() {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            store.remove(id)?;
        }
        CartCommand::Clear { yes } => {
            if store.cart().is_empty() {
                ctx.output.info("Cart is already empty.");
                return Ok(());
            }
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} item(s) from the cart?", store.cart().len()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.info("Cancelled.");
                    return Ok(());
                }
            }
            store.clear()?;
            ctx.output.success("Cart cleared");
        }
    }

    show(&store, ctx);
    Ok(())
}

async fn add(store: &mut CartStore, id: ProductId, quantity: u32, ctx: &Context) -> Result<()> {
    if quantity == 0 {
        bail!("Quantity must be at least 1");
    }

    let catalog = ctx.catalog()?;
    let spinner = ctx.output.spinner("Loading product...");
    let product = catalog.get_product(id).await;
    spinner.finish_and_clear();
    let product = product.with_context(|| format!("Failed to load product {}", id))?;

    let title = product.title.clone();
    store.add(CartItem::new(product, quantity))?;
    ctx.output.success(&format!("Added {} x {}", quantity, title));
    Ok(())
}

fn set(store: &mut CartStore, id: ProductId, quantity: u32, ctx: &Context) -> Result<()> {
    let Some(item) = store.get(id) else {
        bail!("Product {} is not in the cart; use `shop cart add {}` first", id, id);
    };

    let product = item.product.clone();
    store.set_quantity(product, quantity)?;
    if quantity == 0 {
        ctx.output.success(&format!("Removed product {}", id));
    } else {
        ctx.output.success(&format!("Product {} quantity is now {}", id, quantity));
    }
    Ok(())
}

fn show(store: &CartStore, ctx: &Context) {
    let cart = store.cart();

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "items": cart.items(),
            "itemCount": cart.item_count(),
            "subtotal": cart.subtotal().to_decimal(),
        }));
        return;
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    const WIDTHS: [usize; 5] = [5, 36, 10, 4, 10];
    ctx.output.table_row(&["ID", "TITLE", "PRICE", "QTY", "TOTAL"], &WIDTHS);
    for item in cart.items() {
        let id = item.id().to_string();
        let price = item.product.discounted_price().display();
        let quantity = item.quantity.to_string();
        let total = item.line_total().display();
        ctx.output
            .table_row(&[&id, &item.product.title, &price, &quantity, &total], &WIDTHS);
    }

    ctx.output.line("");
    ctx.output.kv("Items", &cart.item_count().to_string());
    ctx.output.kv("Subtotal", &cart.subtotal().display());
}
