//! HTTP client error types.

use thiserror::Error;

/// Errors that can occur when making HTTP requests.
///
/// The cart treats every variant the same way: as a failed lookup.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request or read the reply.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// HTTP error response.
    #[error("HTTP {status} for {url}")]
    HttpError { status: u16, url: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}
