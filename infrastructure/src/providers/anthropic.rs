//! Anthropic Messages API provider
//!
//! Sends each prompt as a single user message and returns the concatenated
//! text blocks of the reply. No conversation state is kept between calls;
//! the prompt already carries everything the player knows.

use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use avalon_application::{DecisionProvider, ProviderError};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Model used when neither config nor CLI names one
pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [RequestMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// One player backed by an Anthropic model
pub struct AnthropicProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    api_version: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let defaults = FileAnthropicConfig::default();
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: defaults.base_url,
            api_version: defaults.api_version,
            model: model.into(),
            max_tokens: defaults.max_tokens,
        }
    }

    /// Build from the `[providers.anthropic]` section.
    ///
    /// Fails with [`ProviderError::MissingCredentials`] when neither
    /// `api_key` nor the `api_key_env` variable holds a key.
    pub fn from_config(
        config: &FileAnthropicConfig,
        model: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ProviderError::MissingCredentials(format!(
                "set {} or providers.anthropic.api_key",
                config.api_key_env
            ))
        })?;

        Ok(Self::new(api_key, model)
            .with_base_url(&config.base_url)
            .with_api_version(&config.api_version)
            .with_max_tokens(config.max_tokens))
    }

    /// Share one HTTP connection pool between players
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

#[async_trait]
impl DecisionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        &self.model
    }

    async fn respond(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [RequestMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(model = %self.model, bytes = prompt.len(), "Sending messages request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProviderError::RequestFailed(format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                detail
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        let text = collect_text(parsed);
        if text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "response contained no text blocks".to_string(),
            ));
        }
        Ok(text)
    }
}

fn collect_text(response: MessagesResponse) -> String {
    response
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("")
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_connect() {
        ProviderError::ConnectionError(e.to_string())
    } else {
        ProviderError::RequestFailed(e.to_string())
    }
}
