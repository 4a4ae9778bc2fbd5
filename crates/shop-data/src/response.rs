//! HTTP response handling.

use crate::FetchError;
use http::StatusCode;
use serde::de::DeserializeOwned;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(status: StatusCode, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::Parse(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::Parse(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// 404 becomes [`FetchError::NotFound`] carrying `url`; every other
    /// failure keeps its status code.
    pub fn error_for_status(self, url: &str) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        if self.status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound {
                url: url.to_string(),
            });
        }

        let message = self
            .text()
            .ok()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| self.status.canonical_reason().map(str::to_string))
            .unwrap_or_else(|| "Unknown error".to_string());
        Err(FetchError::Http {
            status: self.status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(StatusCode::from_u16(status).unwrap(), body.to_vec())
    }

    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(301, b"").is_success());
        assert!(!make_response(500, b"").is_success());
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(matches!(resp.text(), Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_response_json() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Data {
            value: i32,
        }

        let resp = make_response(200, br#"{"value": 42}"#);
        let data: Data = resp.json().unwrap();
        assert_eq!(data, Data { value: 42 });

        let bad = make_response(200, b"not json");
        assert!(bad.json::<Data>().is_err());
    }

    #[test]
    fn test_not_found_is_distinct() {
        let err = make_response(404, b"{\"message\":\"Product with id '9999' not found\"}")
            .error_for_status("https://dummyjson.com/products/9999")
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/products/9999"));
    }

    #[test]
    fn test_server_error_keeps_status() {
        match make_response(503, b"").error_for_status("https://x") {
            Err(FetchError::Http { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_success_passes_through() {
        let resp = make_response(200, b"OK").error_for_status("https://x").unwrap();
        assert_eq!(resp.body, b"OK");
    }
}
