//! Remote product catalog client.

use crate::{FetchClient, FetchError, Transport};
use async_trait::async_trait;
use serde_json::Value;
use shop_commerce::catalog::Product;
use shop_commerce::search::{BrowseQuery, ProductPage};
use shop_commerce::ProductId;
use std::sync::Arc;
use std::time::Duration;

/// Catalog used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com/products";

/// Environment variable that overrides the base URL.
pub const BASE_URL_ENV: &str = "SHOP_API_BASE_URL";

/// Read access to a product catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one page of products matching `query`.
    async fn list_products(&self, query: &BrowseQuery) -> Result<ProductPage, FetchError>;

    /// Fetch a single product.
    async fn get_product(&self, id: ProductId) -> Result<Product, FetchError>;

    /// Fetch the category slugs the catalog knows about.
    async fn list_categories(&self) -> Result<Vec<String>, FetchError>;
}

/// Catalog client speaking the dummyjson products API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: FetchClient,
}

impl CatalogClient {
    /// Create a client for the catalog at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Ok(Self {
            http: FetchClient::new(base_url)?,
        })
    }

    /// Create a client from `SHOP_API_BASE_URL`, falling back to the default.
    pub fn from_env() -> Result<Self, FetchError> {
        Self::new(&base_url_from_env(None))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, FetchError> {
        Ok(Self {
            http: FetchClient::with_transport(base_url, transport)?,
        })
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.http = self.http.with_timeout(timeout)?;
        Ok(self)
    }

    /// The catalog base URL.
    pub fn base_url(&self) -> &str {
        self.http.base_url().as_str()
    }
}

/// Resolve the base URL: environment first, then `configured`, then the default.
pub fn base_url_from_env(configured: Option<&str>) -> String {
    std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn list_products(&self, query: &BrowseQuery) -> Result<ProductPage, FetchError> {
        let request = match (query.search(), query.category()) {
            (Some(term), _) => self.http.get(["search"])?.query("q", term),
            (None, Some(slug)) => self.http.get(["category", slug])?,
            (None, None) => self.http.get([])?,
        };

        let (sort_by, order) = query.sort.sort_params();
        let page: ProductPage = request
            .query("limit", query.per_page.to_string())
            .query("skip", query.offset().to_string())
            .query("sortBy", sort_by)
            .query("order", order.as_str())
            .json()
            .await?;

        tracing::debug!(
            returned = page.len(),
            total = page.total,
            page = query.page,
            "products loaded"
        );
        Ok(page)
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, FetchError> {
        let id = id.to_string();
        self.http.get([id.as_str()])?.json().await
    }

    async fn list_categories(&self) -> Result<Vec<String>, FetchError> {
        let body: Value = self.http.get(["category-list"])?.json().await?;
        Ok(category_slugs(body))
    }
}

/// Pull category slugs out of either a bare array or `{"categories": [...]}`.
///
/// Any other shape yields an empty list. Entries may be strings or objects
/// with a `slug` field.
fn category_slugs(body: Value) -> Vec<String> {
    let entries = match body {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("categories") {
            Some(Value::Array(entries)) => entries,
            _ => {
                tracing::warn!("category list has no categories array");
                return Vec::new();
            }
        },
        other => {
            tracing::warn!(shape = %other, "unexpected category list shape");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(slug) => Some(slug),
            Value::Object(mut fields) => match fields.remove("slug") {
                Some(Value::String(slug)) => Some(slug),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response};
    use http::StatusCode;
    use serde_json::json;
    use shop_commerce::search::SortOption;
    use std::sync::Mutex;

    /// Transport that records requests and answers every one with the same body.
    struct StubTransport {
        status: StatusCode,
        body: String,
        seen: Mutex<Vec<Request>>,
    }

    impl StubTransport {
        fn new(status: StatusCode, body: Value) -> Arc<Self> {
            Arc::new(Self {
                status,
                body: body.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn urls(&self) -> Vec<String> {
            self.seen
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.url.to_string())
                .collect()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn execute(&self, request: Request) -> Result<Response, FetchError> {
            self.seen.lock().unwrap().push(request);
            Ok(Response::new(self.status, self.body.clone().into_bytes()))
        }
    }

    fn empty_page() -> Value {
        json!({"products": [], "total": 0, "skip": 0, "limit": 8})
    }

    fn client(stub: &Arc<StubTransport>) -> CatalogClient {
        CatalogClient::with_transport(DEFAULT_BASE_URL, stub.clone()).unwrap()
    }

    #[tokio::test]
    async fn test_plain_listing_url() {
        let stub = StubTransport::new(StatusCode::OK, empty_page());
        let query = BrowseQuery::new().with_pagination(2, 8);
        client(&stub).list_products(&query).await.unwrap();

        assert_eq!(
            stub.urls(),
            vec!["https://dummyjson.com/products?limit=8&skip=8&sortBy=price&order=asc"]
        );
    }

    #[tokio::test]
    async fn test_search_takes_precedence() {
        let stub = StubTransport::new(StatusCode::OK, empty_page());
        let query = BrowseQuery::new()
            .with_search("red phone")
            .with_category("smartphones")
            .with_sort(SortOption::Newest);
        client(&stub).list_products(&query).await.unwrap();

        assert_eq!(
            stub.urls(),
            vec!["https://dummyjson.com/products/search?q=red+phone&limit=8&skip=0&sortBy=id&order=desc"]
        );
    }

    #[tokio::test]
    async fn test_category_url_encodes_slug() {
        let stub = StubTransport::new(StatusCode::OK, empty_page());
        let query = BrowseQuery::new()
            .with_category("home decoration")
            .with_sort(SortOption::PriceHigh);
        client(&stub).list_products(&query).await.unwrap();

        assert_eq!(
            stub.urls(),
            vec!["https://dummyjson.com/products/category/home%20decoration?limit=8&skip=0&sortBy=price&order=desc"]
        );
    }

    #[tokio::test]
    async fn test_list_parses_page() {
        let stub = StubTransport::new(
            StatusCode::OK,
            json!({
                "products": [{"id": 1, "title": "iPhone 9", "price": 549, "stock": 94}],
                "total": 100, "skip": 0, "limit": 8
            }),
        );
        let page = client(&stub).list_products(&BrowseQuery::new()).await.unwrap();
        assert_eq!(page.total, 100);
        assert_eq!(page.products[0].title, "iPhone 9");
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let stub = StubTransport::new(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
        let err = client(&stub)
            .list_products(&BrowseQuery::new())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Http { status: 500, .. }));
        assert_eq!(stub.urls().len(), 1);
    }

    #[tokio::test]
    async fn test_get_product() {
        let stub = StubTransport::new(
            StatusCode::OK,
            json!({"id": 7, "title": "Lamp", "price": 19.99}),
        );
        let product = client(&stub).get_product(ProductId::new(7)).await.unwrap();
        assert_eq!(product.title, "Lamp");
        assert_eq!(stub.urls(), vec!["https://dummyjson.com/products/7"]);
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let stub = StubTransport::new(StatusCode::NOT_FOUND, json!({"message": "not found"}));
        let err = client(&stub).get_product(ProductId::new(9999)).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_categories_from_array() {
        let stub = StubTransport::new(StatusCode::OK, json!(["beauty", "home-decoration"]));
        let categories = client(&stub).list_categories().await.unwrap();
        assert_eq!(categories, vec!["beauty", "home-decoration"]);
        assert_eq!(stub.urls(), vec!["https://dummyjson.com/products/category-list"]);
    }

    #[tokio::test]
    async fn test_categories_from_object() {
        let stub = StubTransport::new(StatusCode::OK, json!({"categories": ["laptops"]}));
        assert_eq!(client(&stub).list_categories().await.unwrap(), vec!["laptops"]);
    }

    #[test]
    fn test_unexpected_category_shapes_are_empty() {
        assert!(category_slugs(json!({"total": 3})).is_empty());
        assert!(category_slugs(json!("beauty")).is_empty());
        assert!(category_slugs(json!(null)).is_empty());
        assert_eq!(
            category_slugs(json!([{"slug": "beauty", "name": "Beauty"}, 4])),
            vec!["beauty"]
        );
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(matches!(
            CatalogClient::new("mailto:someone@example.com"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
