//! Product and review types.
//!
//! These mirror the JSON shapes served by the catalog API. Field names are
//! camelCase on the wire; anything the API may omit has a serde default so
//! that a sparse record still deserializes.

use crate::ids::ProductId;
use crate::money::Money;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned product identifier.
    pub id: ProductId,
    /// Product title.
    #[serde(default)]
    pub title: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// List price.
    #[serde(default)]
    pub price: f64,
    /// Discount in percent (0-100).
    #[serde(default)]
    pub discount_percentage: f64,
    /// Average rating (0-5).
    #[serde(default)]
    pub rating: f64,
    /// Units in stock.
    #[serde(default)]
    pub stock: u32,
    /// Brand name.
    #[serde(default)]
    pub brand: String,
    /// Raw category slug.
    #[serde(default)]
    pub category: String,
    /// Thumbnail image URL.
    #[serde(default)]
    pub thumbnail: String,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Customer reviews, when the endpoint includes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    /// Availability label (e.g., "In Stock", "Low Stock").
    #[serde(default)]
    pub availability_status: String,
    /// Stock keeping unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_information: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_policy: Option<String>,
}

impl Product {
    /// Create a product with only an id, a title, and a price.
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            price,
            discount_percentage: 0.0,
            rating: 0.0,
            stock: 0,
            brand: String::new(),
            category: String::new(),
            thumbnail: String::new(),
            images: Vec::new(),
            reviews: None,
            availability_status: String::new(),
            sku: None,
            tags: Vec::new(),
            warranty_information: None,
            shipping_information: None,
            return_policy: None,
        }
    }

    /// List price as money.
    pub fn list_price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    /// Price after the product discount.
    pub fn discounted_price(&self) -> Money {
        self.list_price().discounted(self.discount_percentage)
    }

    /// Check if the product has a discount.
    pub fn is_on_sale(&self) -> bool {
        self.discount_percentage > 0.0
    }

    /// Check if any units are in stock.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Rating rounded to stars.
    pub fn star_rating(&self) -> StarRating {
        StarRating::from_rating(self.rating)
    }

    /// The server SKU, or one derived from the brand and id.
    pub fn display_sku(&self) -> String {
        if let Some(sku) = self.sku.as_deref().filter(|s| !s.is_empty()) {
            return sku.to_string();
        }
        let prefix: String = if self.brand.is_empty() {
            "PR".to_string()
        } else {
            self.brand.chars().take(2).collect::<String>().to_uppercase()
        };
        format!("HL-{}-{:03}", prefix, self.id.get())
    }

    /// Reviews, empty when the endpoint omitted them.
    pub fn reviews(&self) -> &[Review] {
        self.reviews.as_deref().unwrap_or(&[])
    }
}

/// Star breakdown of a 0-5 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRating {
    /// Number of filled stars.
    pub full: u8,
    /// Whether a half star follows the filled ones.
    pub half: bool,
}

impl StarRating {
    /// Maximum number of stars.
    pub const MAX: u8 = 5;

    /// Floor of the rating, plus a half star when the fraction is at least 0.5.
    pub fn from_rating(rating: f64) -> Self {
        let rating = rating.clamp(0.0, f64::from(Self::MAX));
        let full = rating.floor() as u8;
        let half = full < Self::MAX && rating.fract() >= 0.5;
        Self { full, half }
    }

    /// Number of empty stars after the full and half ones.
    pub fn empty(&self) -> u8 {
        Self::MAX - self.full - u8::from(self.half)
    }
}

/// Author details embedded in some review payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewUser {
    pub id: u64,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Review text.
    #[serde(default, alias = "comment")]
    pub body: String,
    /// Rating given (0-5).
    #[serde(default)]
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<ReviewUser>,
    /// Review date as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_email: Option<String>,
}

impl Review {
    fn author_id(&self) -> u64 {
        self.user_id
            .or_else(|| self.user.as_ref().map(|u| u.id))
            .unwrap_or(0)
    }

    /// Name to show next to the review.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.reviewer_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        if let Some(user) = self.user.as_ref().filter(|u| !u.username.is_empty()) {
            return user.username.clone();
        }
        format!("User {}", self.author_id())
    }

    /// Email to show next to the review.
    pub fn display_email(&self) -> String {
        self.reviewer_email
            .clone()
            .or_else(|| self.user.as_ref().and_then(|u| u.email.clone()))
            .unwrap_or_else(|| format!("user{}@example.com", self.author_id()))
    }

    /// Date formatted as "May 23, 2024".
    ///
    /// Unparsable dates are returned as sent.
    pub fn formatted_date(&self) -> String {
        let Some(raw) = self.date.as_deref() else {
            return "Unknown date".to_string();
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format("%B %-d, %Y").to_string();
        }
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date.format("%B %-d, %Y").to_string(),
            Err(_) => raw.to_string(),
        }
    }

    /// Stars for this review's rating.
    pub fn star_rating(&self) -> StarRating {
        StarRating::from_rating(self.rating)
    }
}
