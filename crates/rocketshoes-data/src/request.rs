//! HTTP request builder.

use std::collections::BTreeMap;
use std::time::Duration;

/// A GET request under construction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: BTreeMap<String, String>,
    pub(crate) timeout: Option<Duration>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: BTreeMap::new(),
            timeout: None,
        }
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Give up on the request after `timeout`. Without one the request waits
    /// for as long as the server takes.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Header value, if set.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }
}
