//! Category labels and slugs.
//!
//! The catalog API identifies categories by slug (`"home-decoration"`).
//! Users see a humanized label (`"Home Decoration"`). A [`CategoryIndex`] is
//! built from each category-list load and answers lookups in both directions.

use std::collections::HashMap;

/// Turn a slug into a display label.
///
/// Splits on `-` and spaces, capitalizes each word, lowercases the rest, and
/// joins with single spaces.
pub fn humanize_slug(slug: &str) -> String {
    slug.split(['-', ' '])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Bidirectional label/slug lookup for one category list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryIndex {
    /// Labels in server order.
    labels: Vec<String>,
    by_label: HashMap<String, String>,
    by_slug: HashMap<String, String>,
}

impl CategoryIndex {
    /// Build the index from raw slugs, keeping server order.
    ///
    /// When two slugs humanize to the same label, the first one wins.
    pub fn from_slugs<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = Self::default();
        for slug in slugs {
            let slug = slug.into();
            let label = humanize_slug(&slug);
            if index.by_label.contains_key(&label) {
                continue;
            }
            index.labels.push(label.clone());
            index.by_label.insert(label.clone(), slug.clone());
            index.by_slug.insert(slug, label);
        }
        index
    }

    /// Display labels in server order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Slug for a display label.
    pub fn slug_for(&self, label: &str) -> Option<&str> {
        self.by_label.get(label).map(String::as_str)
    }

    /// Display label for a slug.
    pub fn label_for(&self, slug: &str) -> Option<&str> {
        self.by_slug.get(slug).map(String::as_str)
    }

    /// Slug to query with for a selected label.
    ///
    /// Labels not in the index are passed through unchanged, so a slug typed
    /// directly still works before the category list has loaded.
    pub fn resolve(&self, label: &str) -> String {
        self.slug_for(label).unwrap_or(label).to_string()
    }

    /// Label to show for a product's raw category.
    pub fn display(&self, slug: &str) -> String {
        self.label_for(slug)
            .map(str::to_string)
            .unwrap_or_else(|| humanize_slug(slug))
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize_slug("smartphones"), "Smartphones");
        assert_eq!(humanize_slug("home-decoration"), "Home Decoration");
        assert_eq!(humanize_slug("mens-SHIRTS"), "Mens Shirts");
        assert_eq!(humanize_slug("skin care"), "Skin Care");
        assert_eq!(humanize_slug(""), "");
    }

    #[test]
    fn test_index_both_directions() {
        let index = CategoryIndex::from_slugs(["beauty", "home-decoration", "smartphones"]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.labels()[1], "Home Decoration");
        assert_eq!(index.slug_for("Home Decoration"), Some("home-decoration"));
        assert_eq!(index.label_for("home-decoration"), Some("Home Decoration"));
        assert_eq!(index.slug_for("Furniture"), None);
    }

    #[test]
    fn test_resolve_passes_unknown_labels_through() {
        let index = CategoryIndex::from_slugs(["smartphones"]);
        assert_eq!(index.resolve("Smartphones"), "smartphones");
        assert_eq!(index.resolve("laptops"), "laptops");

        let empty = CategoryIndex::default();
        assert!(empty.is_empty());
        assert_eq!(empty.resolve("Smartphones"), "Smartphones");
    }

    #[test]
    fn test_duplicate_labels_keep_first_slug() {
        let index = CategoryIndex::from_slugs(["skin-care", "skin care"]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.slug_for("Skin Care"), Some("skin-care"));
    }

    #[test]
    fn test_display_unknown_slug() {
        let index = CategoryIndex::from_slugs(["beauty"]);
        assert_eq!(index.display("beauty"), "Beauty");
        assert_eq!(index.display("mobile-accessories"), "Mobile Accessories");
    }
}
