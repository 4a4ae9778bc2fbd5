//! Product catalog module.
//!
//! Contains types for products, reviews, and category labels.

mod category;
mod product;

pub use category::{humanize_slug, CategoryIndex};
pub use product::{Product, Review, ReviewUser, StarRating};
