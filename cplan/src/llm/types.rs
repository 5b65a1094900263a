//! LLM request/response types
//!
//! Provider-agnostic shapes; each client converts them to its own wire format.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A completion request - everything needed for one LLM call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction (loaded prompt template)
    pub system_prompt: String,

    /// Conversation messages (one user message per pipeline step)
    pub messages: Vec<Message>,

    /// Max tokens for the response; clients cap this at their configured limit
    pub max_tokens: u32,

    /// Sampling temperature; `None` leaves the provider default
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Build a single-turn request: one system instruction plus one user message
    pub fn single_turn(system_prompt: impl Into<String>, user: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: vec![Message::user(user)],
            max_tokens,
            temperature: None,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        debug!("Message::user: called");
        Self {
            role: Role::User,
            content: text.into(),
        }
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Build a plain text response
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// Consume the response, yielding its text (empty when the model produced none)
    pub fn into_text(self) -> String {
        self.content.unwrap_or_default()
    }

    /// Like [`into_text`](Self::into_text), logging usage and any truncation for `step`
    pub fn into_step_text(self, step: &str) -> String {
        debug!(
            %step,
            input_tokens = self.usage.input_tokens,
            output_tokens = self.usage.output_tokens,
            total_tokens = self.usage.total(),
            "into_step_text: usage"
        );
        if let Some(problem) = self.stop_reason.problem() {
            warn!(%step, %problem, "Reply may be incomplete");
        }
        self.into_text()
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    MaxTokens,
    StopSequence,
    /// Provider-side filtering (safety, recitation, ...)
    Filtered,
}

impl StopReason {
    /// Why a reply with this stop reason cannot be trusted to be complete
    pub fn problem(&self) -> Option<&'static str> {
        match self {
            StopReason::MaxTokens => Some("reply cut off at the token limit"),
            StopReason::Filtered => Some("reply filtered by the provider"),
            StopReason::EndTurn | StopReason::StopSequence => None,
        }
    }

    /// Parse from Anthropic API stop_reason string
    pub fn from_anthropic(s: &str) -> Self {
        debug!(%s, "StopReason::from_anthropic: called");
        match s {
            "max_tokens" => StopReason::MaxTokens,
            "stop_sequence" => StopReason::StopSequence,
            _ => StopReason::EndTurn,
        }
    }

    /// Parse from OpenAI finish_reason string
    pub fn from_openai(s: Option<&str>) -> Self {
        debug!(?s, "StopReason::from_openai: called");
        match s {
            Some("length") => StopReason::MaxTokens,
            Some("content_filter") => StopReason::Filtered,
            _ => StopReason::EndTurn,
        }
    }

    /// Parse from Gemini finishReason string
    pub fn from_gemini(s: Option<&str>) -> Self {
        debug!(?s, "StopReason::from_gemini: called");
        match s {
            Some("MAX_TOKENS") => StopReason::MaxTokens,
            Some("SAFETY") | Some("RECITATION") | Some("BLOCKLIST") | Some("PROHIBITED_CONTENT") => {
                StopReason::Filtered
            }
            _ => StopReason::EndTurn,
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}
