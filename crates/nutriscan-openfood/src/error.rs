use thiserror::Error;

/// Errors returned by the Open Food Facts client.
#[derive(Debug, Error)]
pub enum OpenFoodError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The database has no product record for the barcode.
    #[error("no product found for barcode {barcode}")]
    NotFound { barcode: String },

    /// The API answered with an error envelope or an unusable response.
    #[error("Open Food Facts API error: {0}")]
    ApiError(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
