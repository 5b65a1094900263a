//! LLM Client module
//!
//! Provides the provider-agnostic client trait, the OpenAI, Google and
//! Anthropic implementations, and the model catalog.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod catalog;
pub mod client;
mod error;
mod google;
mod http;
mod openai;
mod types;

pub use anthropic::AnthropicClient;
pub use catalog::Provider;
pub use client::LlmClient;
pub use error::LlmError;
pub use google::GoogleClient;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage};

use crate::config::{ConfigError, ResolvedLlmConfig};

/// Create an LLM client for the resolved provider
///
/// Fails with a configuration error when the provider's API key is missing.
pub fn create_client(config: &ResolvedLlmConfig) -> Result<Arc<dyn LlmClient>, ConfigError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider {
        Provider::OpenAI => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::from_config(config)?))
        }
        Provider::Google => {
            debug!("create_client: creating Google client");
            Ok(Arc::new(GoogleClient::from_config(config)?))
        }
        Provider::Anthropic => {
            debug!("create_client: creating Anthropic client");
            Ok(Arc::new(AnthropicClient::from_config(config)?))
        }
    }
}
