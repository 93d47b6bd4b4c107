//! HTTP client and product API collaborators for RocketShoes.
//!
//! Provides a small GET-oriented fetch client with JSON decoding, and the
//! [`CatalogApi`] seam through which the cart reads stock levels and product
//! data.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_data::{CatalogApi, HttpCatalog};
//! use rocketshoes_commerce::ProductId;
//!
//! let catalog = HttpCatalog::new("http://localhost:3333");
//! let stock = catalog.stock(ProductId::new(1)).await?;
//! let product = catalog.product(ProductId::new(1)).await?;
//! ```

mod catalog;
mod error;
mod request;
mod response;

pub use catalog::{CatalogApi, HttpCatalog};
pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;

use std::collections::BTreeMap;
use std::time::Duration;

/// HTTP client for outbound requests.
///
/// Wraps a shared `reqwest::Client` with a base URL, default headers and an
/// optional per-request timeout.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: BTreeMap<String, String>,
    timeout: Option<Duration>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: BTreeMap::new(),
            timeout: None,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Apply a timeout to every request made by this client.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let url = url.into();
        let full_url = match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!("{}/{}", base.trim_end_matches('/'), url.trim_start_matches('/'))
            }
            _ => url,
        };

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
        }
    }
}

/// A request builder bound to a client.
#[derive(Debug)]
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// The request as built so far.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            url,
            headers,
            timeout,
        } = self.builder;

        let mut request = self.http.get(&url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let reply = request.send().await?;
        let status = reply.status().as_u16();
        let body = reply.bytes().await?.to_vec();

        Ok(Response::new(url, status, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogApi, FetchClient, FetchError, HttpCatalog, Response};
}
