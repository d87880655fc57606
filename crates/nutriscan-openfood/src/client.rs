//! HTTP client for the Open Food Facts REST API.
//!
//! Wraps `reqwest` with typed error handling and response normalization.
//! Lookups are single-shot: a failed request is terminal for the scan that
//! issued it, so no retry policy lives here.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use nutriscan_core::ProductFacts;

use crate::error::OpenFoodError;
use crate::types::ProductEnvelope;

const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";

/// Client for the Open Food Facts product API.
///
/// Use [`OpenFoodClient::new`] for production or
/// [`OpenFoodClient::with_base_url`] to point at a mock server in tests.
pub struct OpenFoodClient {
    client: Client,
    base_url: Url,
}

impl OpenFoodClient {
    /// Creates a new client pointed at the production Open Food Facts API.
    ///
    /// # Errors
    ///
    /// Returns [`OpenFoodError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, OpenFoodError> {
        Self::with_base_url(timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`OpenFoodError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`OpenFoodError::ApiError`] if `base_url`
    /// is not a valid URL.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, OpenFoodError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| OpenFoodError::ApiError(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Fetches and normalizes the product record for a barcode.
    ///
    /// Calls `GET /api/v2/product/{barcode}.json`. Both an HTTP 404 and a
    /// `"status": 0` envelope mean the same thing upstream and map to
    /// [`OpenFoodError::NotFound`].
    ///
    /// # Errors
    ///
    /// - [`OpenFoodError::NotFound`] if no product exists for the barcode.
    /// - [`OpenFoodError::Http`] on network failure or a non-2xx status.
    /// - [`OpenFoodError::Deserialize`] if the response does not match the
    ///   expected shape.
    /// - [`OpenFoodError::ApiError`] if a found-envelope carries no product.
    pub async fn get_product(&self, barcode: &str) -> Result<ProductFacts, OpenFoodError> {
        let url = self.product_url(barcode)?;
        let response = self.client.get(url.clone()).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(OpenFoodError::NotFound {
                barcode: barcode.to_owned(),
            });
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;

        let envelope: ProductEnvelope =
            serde_json::from_str(&body).map_err(|e| OpenFoodError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        if envelope.status == 0 {
            return Err(OpenFoodError::NotFound {
                barcode: barcode.to_owned(),
            });
        }
        let Some(product) = envelope.product else {
            return Err(OpenFoodError::ApiError(
                envelope
                    .status_verbose
                    .unwrap_or_else(|| "product missing from response".to_owned()),
            ));
        };

        Ok(product.into_facts(barcode))
    }

    /// Builds the full product URL with the barcode as a path segment, so
    /// unusual barcodes are percent-encoded rather than spliced raw.
    fn product_url(&self, barcode: &str) -> Result<Url, OpenFoodError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| OpenFoodError::ApiError("base URL cannot carry paths".to_owned()))?
            .pop_if_empty()
            .extend(["api", "v2", "product", &format!("{barcode}.json")]);
        Ok(url)
    }
}
