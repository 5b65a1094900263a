//! Response Parser
//!
//! Turns raw LLM text into typed values in two stages: a JSON payload is
//! extracted and decoded first, and when that fails a line-oriented
//! heuristic parser takes over. Callers see which stage produced the value
//! through [`ParseOutcome`].

use thiserror::Error;
use tracing::debug;

mod advice;
mod subtasks;

pub use advice::{parse_advice, parse_advice_sections};
pub use subtasks::{SubtaskAnalysis, parse_decomposition, parse_subtask_analysis, parse_subtask_lines};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// How a parsed value was obtained
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// Decoded from a JSON payload
    Structured(T),
    /// JSON decoding failed; recovered by the heuristic parser
    Degraded { value: T, reason: String },
    /// Nothing usable could be recovered
    Empty { reason: String },
}

impl<T> ParseOutcome<T> {
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    /// The recovered value, if any
    pub fn value(self) -> Option<T> {
        match self {
            Self::Structured(value) | Self::Degraded { value, .. } => Some(value),
            Self::Empty { .. } => None,
        }
    }

    /// Why the structured stage did not apply
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Structured(_) => None,
            Self::Degraded { reason, .. } | Self::Empty { reason } => Some(reason),
        }
    }
}

impl<T: Default> ParseOutcome<T> {
    pub fn value_or_default(self) -> T {
        self.value().unwrap_or_default()
    }
}

/// Decodable JSON that does not have the expected shape
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("unexpected JSON shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Extract the JSON payload from an LLM reply
///
/// With a ```` ```json ```` fence the payload runs from after the fence to the
/// next ```` ``` ```` (or to the end when unclosed); otherwise the whole reply
/// is the payload. The result is trimmed.
pub fn extract_json_payload(text: &str) -> &str {
    debug!(text_len = text.len(), "extract_json_payload: called");
    match text.find(JSON_FENCE) {
        Some(start) => {
            let rest = &text[start + JSON_FENCE.len()..];
            let end = rest.find(FENCE).unwrap_or(rest.len());
            rest[..end].trim()
        }
        None => text.trim(),
    }
}

pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
