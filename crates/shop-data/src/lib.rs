//! HTTP client and remote catalog access for the storefront client.
//!
//! Provides a small async API for making HTTP requests with automatic JSON
//! handling, and the catalog client built on top of it.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_data::{CatalogClient, CatalogSource};
//! use shop_commerce::search::BrowseQuery;
//!
//! let catalog = CatalogClient::from_env()?;
//!
//! let page = catalog
//!     .list_products(&BrowseQuery::new().with_search("phone"))
//!     .await?;
//! println!("{} of {}", page.len(), page.total);
//!
//! let categories = catalog.list_categories().await?;
//! ```

mod catalog;
mod error;
mod request;
mod response;
mod transport;

pub use catalog::{base_url_from_env, CatalogClient, CatalogSource, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT};

use http::Method;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for JSON GET requests below a base URL.
#[derive(Clone)]
pub struct FetchClient {
    base_url: Url,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for FetchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl FetchClient {
    /// Create a client for `base_url` using the default timeout.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(DEFAULT_TIMEOUT)?;
        Self::with_transport(base_url, Arc::new(transport))
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Result<Self, FetchError> {
        let parsed =
            Url::parse(base_url).map_err(|e| FetchError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            base_url: parsed,
            transport,
        })
    }

    /// Replace the transport with a `reqwest` one using `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, FetchError> {
        self.transport = Arc::new(HttpTransport::new(timeout)?);
        Ok(self)
    }

    /// The base URL requests are built from.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Create a GET request for `segments` below the base URL.
    pub fn get<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<ClientRequestBuilder, FetchError> {
        let builder = RequestBuilder::new(Method::GET, self.base_url.clone()).segments(segments)?;

        Ok(ClientRequestBuilder {
            builder,
            transport: Arc::clone(&self.transport),
        })
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ClientRequestBuilder {
    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Send the request, fail on non-success, and parse the body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T, FetchError> {
        let request = self.builder.accept("application/json").build();
        let url = request.url.to_string();
        tracing::debug!(method = %request.method, url = %url, "sending request");

        let response = self.transport.execute(request).await?;
        response.error_for_status(&url)?.json()
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogClient, CatalogSource, FetchClient, FetchError, Response};
}
