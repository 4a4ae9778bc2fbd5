//! Product detail command.

use anyhow::{Context as _, Result};
use console::style;
use shop_data::CatalogSource;

use super::ProductArgs;
use crate::context::Context;
use crate::output::{stars, stock_label};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Loading product...");
    let product = catalog.get_product(args.id).await;
    spinner.finish_and_clear();
    let product = product.with_context(|| format!("Failed to load product {}", args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
        return Ok(());
    }

    ctx.output.header(&product.title);
    if !product.brand.is_empty() {
        ctx.output.kv("Brand", &product.brand);
    }
    ctx.output.kv("Category", &shop_commerce::catalog::humanize_slug(&product.category));
    ctx.output.kv("SKU", &product.display_sku());

    let price = product.discounted_price().display();
    if product.is_on_sale() {
        ctx.output.kv(
            "Price",
            &format!(
                "{} {} {}",
                style(price).bold(),
                style(product.list_price().display()).dim().strikethrough(),
                style(format!("-{:.0}%", product.discount_percentage)).green()
            ),
        );
    } else {
        ctx.output.kv("Price", &style(price).bold().to_string());
    }

    ctx.output.kv(
        "Rating",
        &format!("{} {:.1}", stars(product.star_rating()), product.rating),
    );
    ctx.output.kv(
        "Stock",
        &format!("{} ({} left)", stock_label(&product), product.stock),
    );
    for (label, value) in [
        ("Warranty", &product.warranty_information),
        ("Shipping", &product.shipping_information),
        ("Returns", &product.return_policy),
    ] {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            ctx.output.kv(label, value);
        }
    }

    if !product.description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&format!("  {}", product.description));
    }

    let reviews = product.reviews();
    if reviews.is_empty() {
        return Ok(());
    }

    ctx.output.header(&format!("Reviews ({})", reviews.len()));
    for review in reviews.iter().take(args.reviews) {
        ctx.output.line(&format!(
            "\n  {} {}  {}",
            stars(review.star_rating()),
            style(review.display_name()).bold(),
            style(review.formatted_date()).dim()
        ));
        ctx.output.line(&format!("  {}", review.body));
    }
    if reviews.len() > args.reviews {
        ctx.output.info(&format!(
            "{} more review(s); use --reviews to show more",
            reviews.len() - args.reviews
        ));
    }

    Ok(())
}
