//! HTTP request builder.

use crate::FetchError;
use http::Method;
use reqwest::Url;
use std::collections::HashMap;

/// A fully described outbound request, ready for a [`Transport`](crate::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: Url,
    pub headers: HashMap<String, String>,
}

/// A builder for constructing HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
        }
    }

    /// Append path segments, percent-encoding each one.
    pub fn segments<'a>(
        mut self,
        segments: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, FetchError> {
        let base = self.url.to_string();
        self.url
            .path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(base))?
            .pop_if_empty()
            .extend(segments);
        Ok(self)
    }

    /// Append a query parameter.
    pub fn query(mut self, key: &str, value: impl AsRef<str>) -> Self {
        self.url.query_pairs_mut().append_pair(key, value.as_ref());
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.headers.insert("Accept".to_string(), content_type.into());
        self
    }

    /// Finish the request.
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(url: &str) -> RequestBuilder {
        RequestBuilder::new(Method::GET, Url::parse(url).unwrap())
    }

    #[test]
    fn test_segments_are_encoded() {
        let request = get("https://dummyjson.com/products")
            .segments(["category", "home decoration"])
            .unwrap()
            .build();
        assert_eq!(
            request.url.as_str(),
            "https://dummyjson.com/products/category/home%20decoration"
        );
    }

    #[test]
    fn test_trailing_slash_is_not_doubled() {
        let request = get("https://dummyjson.com/products/")
            .segments(["1"])
            .unwrap()
            .build();
        assert_eq!(request.url.as_str(), "https://dummyjson.com/products/1");
    }

    #[test]
    fn test_query_pairs_are_encoded() {
        let request = get("https://dummyjson.com/products")
            .query("q", "red & blue")
            .query("limit", "8")
            .build();
        assert_eq!(request.url.query(), Some("q=red+%26+blue&limit=8"));
    }

    #[test]
    fn test_segments_need_a_base() {
        assert!(matches!(
            get("mailto:someone@example.com").segments(["1"]),
            Err(FetchError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_accept_header() {
        let request = get("https://example.com").accept("application/json").build();
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(request.headers.len(), 1);
    }
}
