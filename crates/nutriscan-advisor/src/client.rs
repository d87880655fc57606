//! HTTP client for an OpenRouter-compatible chat-completion endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use nutriscan_core::{Preferences, ProductFacts};

use crate::error::AdvisorError;
use crate::prompt::build_messages;

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// One chat message in the completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Client for the assessment API.
///
/// Use [`AdvisorClient::new`] for production or
/// [`AdvisorClient::with_base_url`] to point at a mock server in tests.
pub struct AdvisorClient {
    client: Client,
    base_url: Url,
    api_key: String,
    model: String,
}

impl AdvisorClient {
    /// Creates a new client pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, AdvisorError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`AdvisorError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, AdvisorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| AdvisorError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }

    /// Requests a natural-language assessment of the product against the
    /// user's preferences and returns the completion text.
    ///
    /// # Errors
    ///
    /// - [`AdvisorError::ApiError`] on a non-2xx response.
    /// - [`AdvisorError::EmptyResponse`] when the completion has no text.
    /// - [`AdvisorError::Http`] on network failure.
    /// - [`AdvisorError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn assess_product(
        &self,
        facts: &ProductFacts,
        preferences: &Preferences,
    ) -> Result<String, AdvisorError> {
        let messages = build_messages(facts, preferences);
        let url = self.completions_url()?;

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages: &messages,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorError::ApiError { status, body });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| AdvisorError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();
        let content = content.trim();
        if content.is_empty() {
            return Err(AdvisorError::EmptyResponse);
        }
        Ok(content.to_owned())
    }

    fn completions_url(&self) -> Result<Url, AdvisorError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| AdvisorError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["chat", "completions"]);
        Ok(url)
    }
}
