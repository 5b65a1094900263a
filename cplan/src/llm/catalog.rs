//! Provider names, model auto-detection and the known-model catalog

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{ConfigError, ResolvedLlmConfig};

/// Supported LLM providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Google,
    Anthropic,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::OpenAI, Provider::Google, Provider::Anthropic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Google => "google",
            Self::Anthropic => "anthropic",
        }
    }

    /// Guess the provider from a model name prefix; unknown models go to OpenAI
    pub fn detect(model: &str) -> Self {
        debug!(%model, "Provider::detect: called");
        if model.starts_with("gemini") {
            Self::Google
        } else if model.starts_with("claude") {
            Self::Anthropic
        } else {
            // gpt-, text-, davinci, curie, babbage, ada and anything unrecognized
            Self::OpenAI
        }
    }

    /// Models known to work with this provider
    pub fn models(&self) -> &'static [&'static str] {
        match self {
            Self::OpenAI => &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo", "gpt-4", "gpt-3.5-turbo"],
            Self::Google => &[
                "gemini-2.0-flash-lite",
                "gemini-2.0-flash",
                "gemini-1.5-pro",
                "gemini-1.5-flash",
                "gemini-pro",
            ],
            Self::Anthropic => &[
                "claude-sonnet-4-20250514",
                "claude-opus-4-20250514",
                "claude-3-5-haiku-20241022",
            ],
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "google" | "gemini" => Ok(Self::Google),
            "anthropic" => Ok(Self::Anthropic),
            _ => Err(ConfigError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// Pick the concrete provider for a configured provider name and model
///
/// `auto` always detects from the model name; `openai` paired with a Gemini
/// model is corrected to Google.
pub fn resolve_provider(provider: &str, model: &str) -> Result<Provider, ConfigError> {
    debug!(%provider, %model, "resolve_provider: called");
    if provider == "auto" || (provider == "openai" && model.starts_with("gemini")) {
        return Ok(Provider::detect(model));
    }
    provider.parse()
}

/// Known models grouped by provider, in display order
pub fn available_models() -> Vec<(Provider, &'static [&'static str])> {
    Provider::ALL.iter().map(|p| (*p, p.models())).collect()
}

/// Check whether a model is in the catalog for a provider
pub fn is_model_available(model: &str, provider: Provider) -> bool {
    provider.models().contains(&model)
}

/// Validate a resolved configuration: credential present and model in the catalog
pub fn validate_configuration(config: &ResolvedLlmConfig) -> Result<(), ConfigError> {
    debug!(provider = %config.provider, model = %config.model, "validate_configuration: called");
    config.get_api_key()?;

    if !is_model_available(&config.model, config.provider) {
        return Err(ConfigError::UnknownModel {
            model: config.model.clone(),
            provider: config.provider.to_string(),
            available: config.provider.models().join(", "),
        });
    }

    Ok(())
}
