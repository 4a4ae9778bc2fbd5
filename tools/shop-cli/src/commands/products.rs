//! Product listing and category commands.

use anyhow::{Context as _, Result};
use serde_json::json;
use shop_commerce::catalog::CategoryIndex;
use shop_commerce::search::{BrowseQuery, Pagination};
use shop_data::CatalogSource;

use super::ProductsArgs;
use crate::context::Context;
use crate::output::listing_summary;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let per_page = ctx.browse_config().per_page;

    let category_slug = match args.category.as_deref() {
        Some(label) if !label.is_empty() => resolve_category(catalog.as_ref(), label).await,
        _ => String::new(),
    };

    let query = BrowseQuery::new()
        .with_search(args.search.unwrap_or_default())
        .with_category(category_slug)
        .with_sort(args.sort)
        .with_pagination(args.page, per_page);

    let spinner = ctx.output.spinner("Loading products...");
    let page = catalog.list_products(&query).await;
    spinner.finish_and_clear();
    let page = page.context("Failed to load products")?;

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    let title = match (query.search(), query.category()) {
        (Some(term), _) => format!("Results for \"{}\"", term),
        (None, Some(slug)) => shop_commerce::catalog::humanize_slug(slug),
        (None, None) => "All Products".to_string(),
    };
    ctx.output.header(&title);
    ctx.output.kv("Sort", query.sort.display_name());

    if page.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }

    ctx.output.line("");
    ctx.output.product_table(&page.products);

    let pagination = Pagination::new(query.page, query.per_page, page.total);
    ctx.output.page_controls(&pagination);
    ctx.output
        .line(&format!("\n  {}", listing_summary(page.len(), &pagination)));

    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let spinner = ctx.output.spinner("Loading categories...");
    let slugs = catalog.list_categories().await;
    spinner.finish_and_clear();
    let slugs = slugs.context("Failed to load categories")?;

    let index = CategoryIndex::from_slugs(slugs);

    if ctx.output.is_json() {
        let entries: Vec<_> = index
            .labels()
            .iter()
            .map(|label| json!({ "label": label, "slug": index.resolve(label) }))
            .collect();
        ctx.output.json(&entries);
        return Ok(());
    }

    ctx.output.header(&format!("Categories ({})", index.len()));
    if index.is_empty() {
        ctx.output.info("No categories available.");
        return Ok(());
    }
    for label in index.labels() {
        ctx.output.list_item(&format!("{}  ({})", label, index.resolve(label)));
    }

    Ok(())
}

/// Map a display label to its slug, passing unknown labels through.
///
/// A failed category fetch is not fatal: the label is used as-is.
async fn resolve_category(catalog: &dyn CatalogSource, label: &str) -> String {
    match catalog.list_categories().await {
        Ok(slugs) => CategoryIndex::from_slugs(slugs).resolve(label),
        Err(e) => {
            tracing::warn!(error = %e, "failed to load categories");
            label.to_string()
        }
    }
}
