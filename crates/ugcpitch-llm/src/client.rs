//! HTTP client for the Anthropic Messages API.
//!
//! Non-success statuses surface as [`LlmError::RequestFailure`] carrying the
//! status code; transport errors pass through as [`LlmError::Http`]. Nothing is
//! retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::LlmError;
use crate::generator::TextGenerator;
use crate::types::{MessagesRequest, MessagesResponse};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const USER_AGENT: &str = "ugcpitch/0.1 (pitch-generator)";

/// Longest slice of an error body copied into logs.
const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Client for the Messages API.
///
/// Use [`AnthropicClient::new`] for production or
/// [`AnthropicClient::with_base_url`] to point at a mock server in tests.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    messages_url: Url,
    model: String,
    max_tokens: u32,
    timeout: Option<Duration>,
}

impl AnthropicClient {
    /// Creates a client pointed at the production API.
    ///
    /// `timeout_secs` of `None` leaves the transport default in place.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: Option<u64>,
    ) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, model, max_tokens, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`LlmError::InvalidBaseUrl`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        max_tokens: u32,
        timeout_secs: Option<u64>,
        base_url: &str,
    ) -> Result<Self, LlmError> {
        let timeout = timeout_secs.map(Duration::from_secs);
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(limit) = timeout {
            builder = builder.connect_timeout(limit).timeout(limit);
        }
        let client = builder.build()?;

        // A trailing slash makes `join` append to the base path instead of
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let messages_url = Url::parse(&normalised)
            .and_then(|base| base.join("v1/messages"))
            .map_err(|e| LlmError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            messages_url,
            model: model.to_owned(),
            max_tokens,
            timeout,
        })
    }

    /// Builds a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`AnthropicClient::with_base_url`].
    pub fn from_config(config: &ugcpitch_core::AppConfig) -> Result<Self, LlmError> {
        Self::with_base_url(
            &config.anthropic_api_key,
            &config.model,
            config.max_tokens,
            config.request_timeout_secs,
            &config.anthropic_base_url,
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn messages_url(&self) -> &Url {
        &self.messages_url
    }

    /// Per-request timeout, or `None` when the transport default applies.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Sends a single-turn message and returns the parsed response.
    ///
    /// # Errors
    ///
    /// - [`LlmError::RequestFailure`] on a non-2xx HTTP status.
    /// - [`LlmError::Http`] on network failure.
    /// - [`LlmError::Deserialize`] if the body is not a Messages response.
    pub async fn create_message(
        &self,
        prompt: &str,
        web_search: bool,
    ) -> Result<MessagesResponse, LlmError> {
        let body = MessagesRequest::single_turn(&self.model, self.max_tokens, prompt, web_search);

        tracing::debug!(
            model = %self.model,
            web_search,
            prompt_chars = prompt.len(),
            "sending generation request"
        );

        let response = self
            .client
            .post(self.messages_url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail: String = detail.chars().take(MAX_LOGGED_BODY_CHARS).collect();
            tracing::warn!(
                status = status.as_u16(),
                body = %detail,
                "generation request failed"
            );
            return Err(LlmError::RequestFailure {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| LlmError::Deserialize {
            context: format!("messages response from {}", self.messages_url),
            source: e,
        })
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str, web_search: bool) -> Result<String, LlmError> {
        let response = self.create_message(prompt, web_search).await?;
        Ok(response.text())
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
