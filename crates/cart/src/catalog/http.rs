//! Catalog REST API client.
//!
//! Uses `reqwest` for HTTP and caches product details with `moka`.
//! Stock is always read fresh.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rocketshoes_core::{Product, ProductId, Stock};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::cache::ProductCache;
use super::{Catalog, CatalogError};
use crate::config::CatalogConfig;

/// Longest response body excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// HttpCatalog
// =============================================================================

/// Client for the catalog REST API.
///
/// Cheap to clone; clones share the HTTP connection pool and product cache.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    base_url: Url,
    products: ProductCache,
}

impl std::fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpCatalog {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| CatalogError::InvalidToken(e.to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpCatalogInner {
                client,
                base_url: with_trailing_slash(config.api_url.clone()),
                products: ProductCache::new(config.product_cache_ttl),
            }),
        })
    }

    /// GET a JSON document relative to the base URL.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let url = self.inner.base_url.join(path)?;

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&response_text),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: excerpt(&response_text),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&response_text),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

impl Catalog for HttpCatalog {
    #[instrument(skip(self), fields(product_id = %id))]
    async fn fetch_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        let stock: Stock = self.get_json(&format!("stock/{id}")).await?;
        debug!(amount = stock.amount, "Fetched stock");
        Ok(stock)
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn fetch_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        if let Some(product) = self.inner.products.get(id).await {
            debug!("Product cache hit");
            return Ok(product);
        }

        let product: Product = self.get_json(&format!("products/{id}")).await?;
        debug!(title = %product.title, "Fetched product");
        self.inner.products.insert(product.clone()).await;
        Ok(product)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Ensure relative joins append to the base path instead of replacing its last segment.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
