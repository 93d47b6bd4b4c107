//! Product API collaborators.

use crate::{ClientRequestBuilder, FetchClient, FetchError, Response};
use async_trait::async_trait;
use rocketshoes_commerce::{Product, ProductId, Stock};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Read-only access to stock levels and product data.
///
/// Implementations reject on any network or server failure; callers do not
/// distinguish between failure kinds.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Current stock for a product (`GET /stock/{id}`).
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError>;

    /// Full product data (`GET /products/{id}`).
    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError>;
}

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        (**self).stock(product_id).await
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        (**self).product(product_id).await
    }
}

/// [`CatalogApi`] backed by the JSON HTTP API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: FetchClient,
}

impl HttpCatalog {
    /// Create a catalog client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: FetchClient::new()
                .with_base_url(base_url)
                .with_default_header("Accept", "application/json"),
        }
    }

    /// Bound every API call by `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.client = self.client.with_timeout(timeout);
        self
    }

    fn stock_request(&self, product_id: ProductId) -> ClientRequestBuilder {
        self.client.get(format!("/stock/{product_id}"))
    }

    fn product_request(&self, product_id: ProductId) -> ClientRequestBuilder {
        self.client.get(format!("/products/{product_id}"))
    }
}

/// Non-2xx replies are failures; anything else must decode as `T`.
fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    response.error_for_status()?.json()
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, FetchError> {
        debug!(%product_id, "fetching stock");
        decode(self.stock_request(product_id).send().await?)
    }

    async fn product(&self, product_id: ProductId) -> Result<Product, FetchError> {
        debug!(%product_id, "fetching product");
        decode(self.product_request(product_id).send().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let catalog = HttpCatalog::new("http://localhost:3333/");
        let id = ProductId::new(4);

        let stock = catalog.stock_request(id);
        assert_eq!(stock.request().url(), "http://localhost:3333/stock/4");
        assert_eq!(stock.request().header_value("Accept"), Some("application/json"));

        let product = catalog.product_request(id);
        assert_eq!(product.request().url(), "http://localhost:3333/products/4");
    }

    #[test]
    fn test_timeout_reaches_requests() {
        let catalog =
            HttpCatalog::new("http://localhost:3333").with_timeout(Some(Duration::from_secs(3)));
        let request = catalog.stock_request(ProductId::new(1));
        assert_eq!(request.request().timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_decode_stock() {
        let response = Response::new(
            "http://localhost:3333/stock/2",
            200,
            br#"{"id":2,"amount":5}"#.to_vec(),
        );
        let stock: Stock = decode(response).unwrap();
        assert_eq!(stock, Stock::new(ProductId::new(2), 5));
    }

    #[test]
    fn test_decode_error_status() {
        let response = Response::new("http://localhost:3333/products/9", 404, b"{}".to_vec());

        let result: Result<Product, _> = decode(response);
        match result {
            Err(FetchError::HttpError { status, url }) => {
                assert_eq!(status, 404);
                assert_eq!(url, "http://localhost:3333/products/9");
            }
            other => panic!("expected HttpError, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_status_ignores_body() {
        // A 500 with a valid-looking body is still a failure.
        let response = Response::new(
            "http://localhost:3333/stock/1",
            500,
            br#"{"id":1,"amount":5}"#.to_vec(),
        );
        let result: Result<Stock, _> = decode(response);
        assert!(matches!(result, Err(FetchError::HttpError { status: 500, .. })));
    }
}
