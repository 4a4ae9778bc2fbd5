//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use shop_commerce::catalog::{Product, StarRating};
use shop_commerce::search::{PageMarker, Pagination};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a plain line.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a page of products as a table.
    pub fn product_table(&self, products: &[Product]) {
        const WIDTHS: [usize; 5] = [5, 36, 10, 7, 12];
        self.table_row(&["ID", "TITLE", "PRICE", "RATING", "STOCK"], &WIDTHS);
        for product in products {
            let id = product.id.to_string();
            let price = product.discounted_price().display();
            let rating = format!("{:.1}", product.rating);
            let stock = availability(product);
            self.table_row(&[&id, &product.title, &price, &rating, stock], &WIDTHS);
        }
    }

    /// Print page controls, highlighting the current page.
    pub fn page_controls(&self, pagination: &Pagination) {
        if self.json || pagination.total_pages == 0 {
            return;
        }

        let markers: Vec<String> = pagination
            .window()
            .into_iter()
            .map(|marker| match marker {
                PageMarker::Page(n) if n == pagination.page => style(format!("[{n}]")).bold().to_string(),
                other => other.to_string(),
            })
            .collect();
        let prev = if pagination.has_prev { "‹ prev" } else { "" };
        let next = if pagination.has_next { "next ›" } else { "" };
        println!("\n  {} {} {}", style(prev).dim(), markers.join(" "), style(next).dim());
    }
}

/// "Showing X of Y products", with the item range when anything is shown.
pub fn listing_summary(shown: usize, pagination: &Pagination) -> String {
    if shown == 0 {
        return format!("Showing 0 of {} products", pagination.total);
    }
    format!(
        "Showing {} of {} products ({}-{})",
        shown,
        pagination.total,
        pagination.start_item(),
        pagination.end_item()
    )
}

/// Stars for a rating, e.g. `★★★½☆`.
pub fn stars(rating: StarRating) -> String {
    let mut out = "★".repeat(usize::from(rating.full));
    if rating.half {
        out.push('½');
    }
    out.push_str(&"☆".repeat(usize::from(rating.empty())));
    out
}

/// Availability text, derived from stock when the catalog sends none.
pub fn availability(product: &Product) -> &str {
    if !product.availability_status.is_empty() {
        product.availability_status.as_str()
    } else if product.is_in_stock() {
        "In Stock"
    } else {
        "Out of Stock"
    }
}

/// Availability text colored by stock level.
pub fn stock_label(product: &Product) -> String {
    let label = availability(product);

    if !product.is_in_stock() {
        style(label).red().to_string()
    } else if product.stock < 10 {
        style(label).yellow().to_string()
    } else {
        style(label).green().to_string()
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(StarRating::from_rating(3.5)), "★★★½☆");
        assert_eq!(stars(StarRating::from_rating(4.2)), "★★★★☆");
        assert_eq!(stars(StarRating::from_rating(0.0)), "☆☆☆☆☆");
    }

    #[test]
    fn test_listing_summary() {
        let second = Pagination::new(2, 8, 20);
        assert_eq!(listing_summary(8, &second), "Showing 8 of 20 products (9-16)");

        let last = Pagination::new(3, 8, 20);
        assert_eq!(listing_summary(4, &last), "Showing 4 of 20 products (17-20)");

        assert_eq!(
            listing_summary(0, &Pagination::new(1, 8, 0)),
            "Showing 0 of 0 products"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Phone", 10), "Phone");
        assert_eq!(truncate("Essence Mascara Lash Princess", 8), "Essence…");
    }
}
