//! Network transport seam.

use crate::{FetchError, Request, Response};
use async_trait::async_trait;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Something that can carry a [`Request`] to a server and bring back the
/// [`Response`].
///
/// Non-success statuses are returned as responses, not errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, FetchError>;
}

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shop/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<Response, FetchError> {
        let mut builder = self.client.request(request.method, request.url);
        for (key, value) in &request.headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(Response::new(status, body))
    }
}
