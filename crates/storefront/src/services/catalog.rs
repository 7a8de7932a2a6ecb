//! Catalog feed client.
//!
//! One `GET` to the configured endpoint with a fixed query; the response is
//! a JSON object with a `products` list. No retries, no caching, no paging
//! beyond the configured page.

use serde::Deserialize;
use shopfront_core::Product;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::CatalogConfig;

/// Errors that can occur when fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status}")]
    Status { status: u16 },

    /// Response body was not the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configured endpoint is not a valid URL.
    #[error("Invalid catalog endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    products: Vec<Product>,
}

/// Client for the remote product catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: Url,
}

impl CatalogClient {
    /// Create a catalog client with the query baked into its URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn new(config: &CatalogConfig, client: reqwest::Client) -> Result<Self, CatalogError> {
        let page = config.page.to_string();
        let limit = config.limit.to_string();
        let url = Url::parse_with_params(
            &config.endpoint,
            &[
                ("url", config.category_path.as_str()),
                ("sort", config.sort.as_str()),
                ("sortDir", config.sort_dir.as_str()),
                ("page", page.as_str()),
                ("limit", limit.as_str()),
            ],
        )?;

        Ok(Self { client, url })
    }

    /// Full request URL, including the query.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the configured page of products.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success status, or a body
    /// without a `products` list.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }

        // Read as text first for better error diagnostics
        let body = response.text().await?;
        let catalog: CatalogResponse = serde_json::from_str(&body).map_err(|e| {
            debug!(
                body = %body.chars().take(500).collect::<String>(),
                "Catalog response did not match expected shape"
            );
            e
        })?;

        debug!(count = catalog.products.len(), "Fetched catalog");
        Ok(catalog.products)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_url_encodes_fixed_query() {
        let client = CatalogClient::new(&CatalogConfig::default(), reqwest::Client::new()).unwrap();
        let url = client.url().as_str();

        assert!(url.starts_with("https://api.vendoo.ge/api/beta/catalog?"));
        assert!(url.contains(
            "url=technics%2Fkompiuteruli-teqnika%2Fnoutbuqebi-da-misi-aqsesuarebi"
        ));
        assert!(url.contains("sort=popular"));
        assert!(url.contains("sortDir=desc"));
        assert!(url.contains("page=1"));
        assert!(url.contains("limit=20"));
    }

    #[test]
    fn test_invalid_endpoint() {
        let config = CatalogConfig {
            endpoint: "not a url".to_string(),
            ..CatalogConfig::default()
        };
        let result = CatalogClient::new(&config, reqwest::Client::new());
        assert!(matches!(result, Err(CatalogError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_response_shape() {
        let catalog: CatalogResponse = serde_json::from_str(
            r#"{"products": [{"id": 1, "name": "A", "original_price": "10"}], "total": 1}"#,
        )
        .unwrap();
        assert_eq!(catalog.products.len(), 1);

        assert!(serde_json::from_str::<CatalogResponse>(r#"{"items": []}"#).is_err());
    }

    #[test]
    fn test_status_error_display() {
        let err = CatalogError::Status { status: 503 };
        assert_eq!(err.to_string(), "API error: 503");
    }
}
