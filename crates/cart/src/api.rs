//! Remote product and stock lookups.
//!
//! The store consults two read-only collaborators before committing any
//! quantity change: the product catalog and the stock service. Both are
//! expressed as traits so front ends and tests can substitute fakes;
//! [`ApiClient`] is the shipped implementation against the store's REST API
//! (`GET /products/{id}` and `GET /stock/{id}`, JSON bodies).
//!
//! Lookups are deliberately uncached: stock observed during one operation
//! must be current stock, so every mutation fetches fresh.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::instrument;

use shoebox_core::{Product, ProductId, StockEntry};

use crate::config::CartConfig;

/// Errors that can occur when talking to the store API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (transport, timeout, redirect policy).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// API returned a non-success status.
    #[error("Unexpected status: {0}")]
    Status(reqwest::StatusCode),
}

/// Read-only, idempotent product lookup.
#[allow(async_fn_in_trait)]
pub trait ProductCatalog {
    /// Fetch the catalog entry for a product, `None` when the catalog does
    /// not know the ID.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, ApiError>;
}

/// Read-only, idempotent stock lookup.
///
/// The returned amount is the authoritative current availability.
#[allow(async_fn_in_trait)]
pub trait StockService {
    /// Fetch current availability for a product.
    async fn get(&self, id: ProductId) -> Result<StockEntry, ApiError>;
}

/// A store and its owner can share one catalog through an `Arc`.
impl<C: ProductCatalog> ProductCatalog for Arc<C> {
    async fn get(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        (**self).get(id).await
    }
}

/// A store and its owner can share one stock service through an `Arc`.
impl<S: StockService> StockService for Arc<S> {
    async fn get(&self, id: ProductId) -> Result<StockEntry, ApiError> {
        (**self).get(id).await
    }
}

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the store's REST API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the configured base URL and request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be constructed.
    pub fn new(config: &CartConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Execute a GET request and parse the JSON response body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}/{path}", self.inner.base_url);

        let response = self.inner.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        // Read the body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "store API returned non-success status"
            );
            return Err(ApiError::Status(status));
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(200).collect::<String>(),
                    "failed to parse store API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }
}

impl ProductCatalog for ApiClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, ApiError> {
        match self.get_json::<Product>(&format!("products/{id}")).await {
            Ok(product) => Ok(Some(product)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl StockService for ApiClient {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn get(&self, id: ProductId) -> Result<StockEntry, ApiError> {
        self.get_json(&format!("stock/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base: &str) -> CartConfig {
        CartConfig {
            api_url: base.parse().expect("valid url"),
            cart_path: "unused.json".into(),
            http_timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_catalog_get_parses_product() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"title":"Sneaker","price":179.9,"image":"https://cdn/s.jpg"}"#)
            .create_async()
            .await;

        let client = ApiClient::new(&config(&server.url())).expect("client");
        let product = ProductCatalog::get(&client, ProductId::new(1))
            .await
            .expect("lookup succeeds")
            .expect("product exists");

        assert_eq!(product.title, "Sneaker");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_catalog_get_maps_404_to_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/99")
            .with_status(404)
            .create_async()
            .await;

        let client = ApiClient::new(&config(&server.url())).expect("client");
        let product = ProductCatalog::get(&client, ProductId::new(99))
            .await
            .expect("lookup succeeds");

        assert!(product.is_none());
    }

    #[tokio::test]
    async fn test_stock_get_surfaces_server_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/1")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let client = ApiClient::new(&config(&server.url())).expect("client");
        let err = StockService::get(&client, ProductId::new(1))
            .await
            .expect_err("lookup fails");

        assert!(matches!(err, ApiError::Status(s) if s.as_u16() == 500));
    }

    #[tokio::test]
    async fn test_stock_get_surfaces_parse_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/1")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = ApiClient::new(&config(&server.url())).expect("client");
        let err = StockService::get(&client, ProductId::new(1))
            .await
            .expect_err("lookup fails");

        assert!(matches!(err, ApiError::Parse(_)));
    }
}
