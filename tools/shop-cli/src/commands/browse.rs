//! Interactive browsing session.

use anyhow::{bail, Context as _, Result};
use indicatif::ProgressBar;
use shop_browse::{BrowseController, BrowseEvent, LoadStatus};
use shop_commerce::cart::{CartItem, CartStore};
use shop_commerce::search::SortOption;
use shop_commerce::ProductId;
use shop_data::{CatalogClient, CatalogSource};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::BrowseArgs;
use crate::context::Context;

/// One line of user input.
#[derive(Debug, PartialEq)]
enum Action {
    Search(String),
    Category(String),
    Sort(SortOption),
    Page(u32),
    Next,
    Prev,
    Add(ProductId, u32),
    Cart,
    Categories,
    Retry,
    Help,
    Quit,
    Invalid(String),
}

fn parse_action(line: &str) -> Option<Action> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(term) = line.strip_prefix('/') {
        return Some(Action::Search(term.trim().to_string()));
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let action = match command.to_lowercase().as_str() {
        "search" | "s" => Action::Search(rest.to_string()),
        "category" | "cat" | "c" => Action::Category(rest.to_string()),
        "sort" => match rest.parse() {
            Ok(sort) => Action::Sort(sort),
            Err(_) => Action::Invalid(format!(
                "Unknown sort '{}'. Options: newest, oldest, price-low, price-high",
                rest
            )),
        },
        "page" => match rest.parse() {
            Ok(page) => Action::Page(page),
            Err(_) => Action::Invalid(format!("Not a page number: '{}'", rest)),
        },
        "next" | "n" => Action::Next,
        "prev" | "p" => Action::Prev,
        "add" | "a" => {
            let mut parts = rest.split_whitespace();
            let id = parts.next().map(str::parse::<ProductId>);
            let quantity = parts.next().map(str::parse::<u32>).unwrap_or(Ok(1));
            match (id, quantity) {
                (Some(Ok(id)), Ok(quantity)) if quantity > 0 => Action::Add(id, quantity),
                _ => Action::Invalid("Usage: add <id> [quantity]".to_string()),
            }
        }
        "cart" => Action::Cart,
        "categories" | "cats" => Action::Categories,
        "retry" | "r" => Action::Retry,
        "help" | "?" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        other => Action::Invalid(format!("Unknown command '{}'. Type `help` for commands.", other)),
    };
    Some(action)
}

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("`shop browse` is interactive and does not support --json");
    }

    let catalog = ctx.catalog()?;
    let mut store = ctx.cart_store()?;
    let mut browse = BrowseController::new(catalog.clone(), ctx.browse_config());

    print_help(ctx);
    browse.load();
    if let Some(term) = args.search {
        browse.set_search_input(term);
    }
    let mut spinner = Some(ctx.output.spinner("Loading products..."));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                let Some(action) = parse_action(&line) else {
                    continue;
                };
                if action == Action::Quit {
                    break;
                }
                apply(action, &mut browse, &mut store, &catalog, ctx).await;
                if browse.status().is_loading() && spinner.is_none() {
                    spinner = Some(ctx.output.spinner("Loading products..."));
                }
            }
            Some(event) = browse.next_event() => {
                if matches!(event, BrowseEvent::ProductsLoaded { .. } | BrowseEvent::Failed(_)) {
                    finish(&mut spinner);
                }
                render(&event, &browse, ctx);
            }
        }
    }

    finish(&mut spinner);
    Ok(())
}

fn finish(spinner: &mut Option<ProgressBar>) {
    if let Some(spinner) = spinner.take() {
        spinner.finish_and_clear();
    }
}

async fn apply(
    action: Action,
    browse: &mut BrowseController,
    store: &mut CartStore,
    catalog: &CatalogClient,
    ctx: &Context,
) {
    match action {
        Action::Search(term) => browse.set_search_input(term),
        Action::Category(label) => browse.set_category(label),
        Action::Sort(sort) => browse.set_sort(sort),
        Action::Page(page) => browse.set_page(page),
        Action::Next => {
            if !browse.pagination().has_next {
                ctx.output.info("Already on the last page.");
            }
            browse.next_page();
        }
        Action::Prev => {
            if !browse.pagination().has_prev {
                ctx.output.info("Already on the first page.");
            }
            browse.prev_page();
        }
        Action::Add(id, quantity) => {
            if let Err(e) = add_to_cart(id, quantity, browse, store, catalog).await {
                ctx.output.error(&format!("{:#}", e));
                return;
            }
            let cart = store.cart();
            ctx.output.success(&format!(
                "Added to cart ({} item(s), {})",
                cart.item_count(),
                cart.subtotal().display()
            ));
        }
        Action::Cart => {
            let cart = store.cart();
            ctx.output.header("Cart");
            for item in cart.items() {
                ctx.output.list_item(&format!("{} x {}", item.quantity, item.product.title));
            }
            ctx.output.kv("Subtotal", &cart.subtotal().display());
        }
        Action::Categories => {
            let labels = browse.categories().labels();
            if labels.is_empty() {
                ctx.output.info("No categories loaded.");
            }
            for label in labels {
                ctx.output.list_item(label);
            }
        }
        Action::Retry => browse.retry(),
        Action::Help => print_help(ctx),
        Action::Invalid(message) => ctx.output.warn(&message),
        Action::Quit => {}
    }
}

async fn add_to_cart(
    id: ProductId,
    quantity: u32,
    browse: &BrowseController,
    store: &mut CartStore,
    catalog: &CatalogClient,
) -> Result<()> {
    let product = match browse.products().iter().find(|p| p.id == id) {
        Some(product) => product.clone(),
        None => catalog
            .get_product(id)
            .await
            .with_context(|| format!("Failed to load product {}", id))?,
    };
    store.add(CartItem::new(product, quantity))?;
    Ok(())
}

fn render(event: &BrowseEvent, browse: &BrowseController, ctx: &Context) {
    match event {
        BrowseEvent::SearchApplied(term) if term.is_empty() => ctx.output.debug("Search cleared"),
        BrowseEvent::SearchApplied(term) => ctx.output.debug(&format!("Searching for \"{}\"", term)),
        BrowseEvent::CategoriesLoaded(count) => {
            ctx.output.debug(&format!("{} categories loaded", count))
        }
        BrowseEvent::Failed(message) => {
            ctx.output.error(message);
            ctx.output.info("Type `retry` to reload.");
        }
        BrowseEvent::ProductsLoaded { .. } => render_listing(browse, ctx),
    }
}

fn render_listing(browse: &BrowseController, ctx: &Context) {
    if browse.status() != &LoadStatus::Ready {
        return;
    }

    let state = browse.state();
    let mut title = String::from("Products");
    if !state.search_term.is_empty() {
        title = format!("Results for \"{}\"", state.search_term);
    } else if !state.category.is_empty() {
        title = state.category.clone();
    }
    ctx.output.header(&format!("{}  ·  {}", title, state.sort.display_name()));

    if browse.products().is_empty() {
        ctx.output.info("No products found.");
        if state.is_filtered() {
            ctx.output.info("Type `retry` to clear the search and category.");
        }
    } else {
        ctx.output.product_table(browse.products());
        ctx.output.page_controls(&browse.pagination());
    }
    ctx.output.line(&format!("\n  {}", browse.summary()));
}

fn print_help(ctx: &Context) {
    ctx.output.header("Commands");
    for (usage, description) in [
        ("/<text>, search <text>", "search products (empty clears)"),
        ("category <label>", "filter by category (empty shows all)"),
        ("sort <option>", "newest, oldest, price-low, price-high"),
        ("page <n>, next, prev", "change page"),
        ("add <id> [qty]", "add a product to the cart"),
        ("cart, categories", "show the cart or the category list"),
        ("retry", "reset filters and reload"),
        ("quit", "leave"),
    ] {
        ctx.output.kv(usage, description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        assert_eq!(parse_action("/red phone"), Some(Action::Search("red phone".into())));
        assert_eq!(parse_action("search"), Some(Action::Search(String::new())));
        assert_eq!(parse_action("   "), None);
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            parse_action("category Home Decoration"),
            Some(Action::Category("Home Decoration".into()))
        );
        assert_eq!(parse_action("sort newest"), Some(Action::Sort(SortOption::Newest)));
        assert!(matches!(parse_action("sort cheapest"), Some(Action::Invalid(_))));
        assert_eq!(parse_action("page 3"), Some(Action::Page(3)));
        assert_eq!(parse_action("N"), Some(Action::Next));
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(parse_action("add 5"), Some(Action::Add(ProductId::new(5), 1)));
        assert_eq!(parse_action("add 5 3"), Some(Action::Add(ProductId::new(5), 3)));
        assert!(matches!(parse_action("add five"), Some(Action::Invalid(_))));
        assert!(matches!(parse_action("add 5 0"), Some(Action::Invalid(_))));
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(parse_action("frobnicate"), Some(Action::Invalid(_))));
        assert_eq!(parse_action("quit"), Some(Action::Quit));
    }
}
