//! HTTP response handling.

use crate::FetchError;
use serde::de::DeserializeOwned;

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// URL the response came from.
    pub url: String,
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create a new response.
    pub fn new(url: impl Into<String>, status: u16, body: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            status,
            body,
        }
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpError {
                status: self.status,
                url: self.url,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocketshoes_commerce::{ProductId, Stock};

    fn response(status: u16, body: &[u8]) -> Response {
        Response::new("http://localhost:3333/stock/1", status, body.to_vec())
    }

    #[test]
    fn test_success_range() {
        assert!(response(200, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(304, b"").is_success());
        assert!(!response(404, b"").is_success());
    }

    #[test]
    fn test_json_stock() {
        let stock: Stock = response(200, br#"{"id":1,"amount":3}"#).json().unwrap();
        assert_eq!(stock, Stock::new(ProductId::new(1), 3));
    }

    #[test]
    fn test_json_malformed() {
        let result: Result<Stock, _> = response(200, b"<html>").json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_error_for_status() {
        assert!(response(200, b"{}").error_for_status().is_ok());

        match response(404, b"Not Found").error_for_status() {
            Err(FetchError::HttpError { status, url }) => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/stock/1"));
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }
}
