use thiserror::Error;

/// Errors returned by the assessment client.
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL passed to the constructor could not be parsed.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The API answered with a non-2xx status.
    #[error("assessment API error {status}: {body}")]
    ApiError { status: u16, body: String },

    /// The API answered 2xx but the completion carried no usable text.
    #[error("assessment response carried no content")]
    EmptyResponse,

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
