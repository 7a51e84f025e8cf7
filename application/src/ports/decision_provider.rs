//! Decision provider port
//!
//! Defines the interface for the agents that play the game. A provider
//! receives a prompt and answers in free text; decoding that text into a
//! decision happens in the domain layer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while asking a provider for a response
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// An agent that answers prompts for one player
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Human-readable name of the backing model or strategy
    fn name(&self) -> &str;

    /// Answer a prompt with free text
    async fn respond(&self, prompt: &str) -> Result<String, ProviderError>;
}
