//! Codeplanner configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::llm::Provider;
use crate::llm::catalog::resolve_provider;

/// Accepted values for the analysis depth ceiling
pub const DEPTH_RANGE: RangeInclusive<u32> = 1..=5;

/// Errors raised while building clients, prompts or a run from configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("API key for {provider} not found. Set the {env} environment variable.")]
    MissingApiKey { provider: String, env: String },

    #[error("Model '{model}' is not available for provider '{provider}'. Available models: {available}")]
    UnknownModel {
        model: String,
        provider: String,
        available: String,
    },

    #[error("Prompt template not found: {0}")]
    MissingTemplate(String),

    #[error("Invalid prompt template '{name}': {reason}")]
    InvalidTemplate { name: String, reason: String },

    #[error("Invalid max depth {0}: must be between 1 and 5")]
    InvalidDepth(u32),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Check a requested depth ceiling against [`DEPTH_RANGE`]
pub fn check_depth(depth: u32) -> Result<u32, ConfigError> {
    if DEPTH_RANGE.contains(&depth) {
        Ok(depth)
    } else {
        Err(ConfigError::InvalidDepth(depth))
    }
}

/// Main Codeplanner configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration
    pub llm: LlmConfig,

    /// Analysis loop settings
    pub analysis: AnalysisConfig,

    /// Prompt template settings
    pub prompts: PromptsConfig,
}

impl Config {
    /// Resolve the LLM settings for a run and check them before any request
    ///
    /// Fails on a depth outside [`DEPTH_RANGE`], an unsupported provider or
    /// a missing API key for the resolved provider.
    pub fn validate(&self, overrides: &LlmOverrides, max_depth: u32) -> Result<ResolvedLlmConfig, ConfigError> {
        debug!(%max_depth, "validate: called");
        check_depth(max_depth)?;
        let resolved = self.llm.resolve(overrides)?;
        resolved.get_api_key()?;
        Ok(resolved)
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .codeplanner.yml
        let local_config = PathBuf::from(".codeplanner.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/codeplanner/codeplanner.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("codeplanner").join("codeplanner.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// LLM provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name: openai, google, anthropic or auto
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Per-provider credentials and endpoints
    pub providers: ProvidersConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            timeout_ms: 300_000,
            providers: ProvidersConfig::default(),
        }
    }
}

impl LlmConfig {
    /// Apply per-run overrides and pick the concrete provider
    pub fn resolve(&self, overrides: &LlmOverrides) -> Result<ResolvedLlmConfig, ConfigError> {
        let provider_name = overrides.provider.as_deref().unwrap_or(&self.provider);
        let model = overrides.model.clone().unwrap_or_else(|| self.model.clone());
        debug!(%provider_name, %model, "resolve: called");

        let provider = resolve_provider(provider_name, &model)?;
        let endpoint = self.providers.get(provider);

        Ok(ResolvedLlmConfig {
            provider,
            model,
            api_key_env: endpoint
                .api_key_env
                .clone()
                .unwrap_or_else(|| default_api_key_env(provider).to_string()),
            base_url: endpoint
                .base_url
                .clone()
                .unwrap_or_else(|| default_base_url(provider).to_string()),
            temperature: overrides.temperature.unwrap_or(self.temperature),
            max_tokens: self.max_tokens,
            timeout_ms: self.timeout_ms,
        })
    }
}

fn default_api_key_env(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAI => "OPENAI_API_KEY",
        Provider::Google => "GOOGLE_API_KEY",
        Provider::Anthropic => "ANTHROPIC_API_KEY",
    }
}

fn default_base_url(provider: Provider) -> &'static str {
    match provider {
        Provider::OpenAI => "https://api.openai.com",
        Provider::Google => "https://generativelanguage.googleapis.com",
        Provider::Anthropic => "https://api.anthropic.com",
    }
}

/// Credentials and endpoints, one entry per provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub openai: ProviderConfig,
    pub google: ProviderConfig,
    pub anthropic: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::OpenAI => &self.openai,
            Provider::Google => &self.google,
            Provider::Anthropic => &self.anthropic,
        }
    }
}

/// Overrides for a single provider; unset fields use the provider's defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: Option<String>,

    /// API base URL
    #[serde(rename = "base-url")]
    pub base_url: Option<String>,
}

/// Analysis loop settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum number of analysis passes (1-5)
    #[serde(rename = "max-depth")]
    pub max_depth: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

/// Prompt template settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Extra directory searched before the built-in locations
    pub dir: Option<PathBuf>,
}

/// Per-run values taken from the command line
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Fully resolved LLM settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLlmConfig {
    pub provider: Provider,
    pub model: String,
    pub api_key_env: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_ms: u64,
}

impl ResolvedLlmConfig {
    /// Read the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String, ConfigError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey {
                provider: self.provider.to_string(),
                env: self.api_key_env.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, 2000);
        assert_eq!(config.analysis.max_depth, 3);
        assert!(config.prompts.dir.is_none());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
llm:
  provider: auto
  model: gemini-2.0-flash
  temperature: 0.7
  max-tokens: 4096
  timeout-ms: 60000
  providers:
    google:
      api-key-env: MY_GEMINI_KEY
      base-url: https://gemini.example.com

analysis:
  max-depth: 2

prompts:
  dir: /tmp/prompts
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.provider, "auto");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.llm.timeout_ms, 60000);
        assert_eq!(config.analysis.max_depth, 2);
        assert_eq!(config.prompts.dir, Some(PathBuf::from("/tmp/prompts")));

        let resolved = config.llm.resolve(&LlmOverrides::default()).unwrap();
        assert_eq!(resolved.provider, Provider::Google);
        assert_eq!(resolved.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(resolved.base_url, "https://gemini.example.com");
        assert!((resolved.temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
llm:
  model: gpt-4o-mini
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.provider, "openai");
        assert_eq!(config.analysis.max_depth, 3);

        let resolved = config.llm.resolve(&LlmOverrides::default()).unwrap();
        assert_eq!(resolved.api_key_env, "OPENAI_API_KEY");
        assert_eq!(resolved.base_url, "https://api.openai.com");
    }

    #[test]
    fn test_overrides_win() {
        let config = LlmConfig::default();
        let overrides = LlmOverrides {
            provider: Some("anthropic".to_string()),
            model: Some("claude-opus-4-20250514".to_string()),
            temperature: Some(0.0),
        };

        let resolved = config.resolve(&overrides).unwrap();
        assert_eq!(resolved.provider, Provider::Anthropic);
        assert_eq!(resolved.model, "claude-opus-4-20250514");
        assert_eq!(resolved.api_key_env, "ANTHROPIC_API_KEY");
        assert_eq!(resolved.temperature, 0.0);
    }

    #[test]
    fn test_openai_with_gemini_model_redetects() {
        let config = LlmConfig {
            model: "gemini-1.5-pro".to_string(),
            ..LlmConfig::default()
        };
        let resolved = config.resolve(&LlmOverrides::default()).unwrap();
        assert_eq!(resolved.provider, Provider::Google);
        assert_eq!(resolved.api_key_env, "GOOGLE_API_KEY");
    }

    #[test]
    fn test_unsupported_provider() {
        let config = LlmConfig {
            provider: "cohere".to_string(),
            ..LlmConfig::default()
        };
        assert!(matches!(
            config.resolve(&LlmOverrides::default()),
            Err(ConfigError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn test_check_depth() {
        assert_eq!(check_depth(1).unwrap(), 1);
        assert_eq!(check_depth(5).unwrap(), 5);
        assert!(matches!(check_depth(0), Err(ConfigError::InvalidDepth(0))));
        assert!(matches!(check_depth(6), Err(ConfigError::InvalidDepth(6))));
    }

    #[test]
    #[serial]
    fn test_get_api_key() {
        let mut resolved = LlmConfig::default().resolve(&LlmOverrides::default()).unwrap();
        resolved.api_key_env = "CPLAN_TEST_CONFIG_KEY".to_string();

        // SAFETY: serialized with other env-mutating tests
        unsafe { std::env::set_var("CPLAN_TEST_CONFIG_KEY", "sk-test") };
        assert_eq!(resolved.get_api_key().unwrap(), "sk-test");

        unsafe { std::env::set_var("CPLAN_TEST_CONFIG_KEY", "  ") };
        assert!(matches!(resolved.get_api_key(), Err(ConfigError::MissingApiKey { .. })));

        unsafe { std::env::remove_var("CPLAN_TEST_CONFIG_KEY") };
        let err = resolved.get_api_key().unwrap_err();
        assert!(err.to_string().contains("CPLAN_TEST_CONFIG_KEY"));
    }

    #[test]
    #[serial]
    fn test_validate() {
        let mut config = Config::default();
        config.llm.providers.openai.api_key_env = Some("PATH".to_string());
        let none = LlmOverrides::default();

        let resolved = config.validate(&none, 3).unwrap();
        assert_eq!(resolved.provider, Provider::OpenAI);
        assert_eq!(resolved.model, "gpt-4o");

        assert!(matches!(config.validate(&none, 9), Err(ConfigError::InvalidDepth(9))));

        config.llm.providers.openai.api_key_env = Some("CPLAN_TEST_UNSET_KEY".to_string());
        assert!(matches!(config.validate(&none, 3), Err(ConfigError::MissingApiKey { .. })));
    }

    #[test]
    #[serial]
    fn test_validate_checks_overridden_provider_key() {
        let mut config = Config::default();
        config.llm.providers.openai.api_key_env = Some("PATH".to_string());
        config.llm.providers.google.api_key_env = Some("CPLAN_TEST_UNSET_KEY".to_string());

        let overrides = LlmOverrides {
            provider: Some("auto".to_string()),
            model: Some("gemini-2.0-flash".to_string()),
            temperature: None,
        };
        let err = config.validate(&overrides, 2).unwrap_err();
        assert!(err.to_string().contains("CPLAN_TEST_UNSET_KEY"));
    }
}
