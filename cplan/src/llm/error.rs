//! Errors from a single completion request

use std::time::Duration;
use thiserror::Error;

/// Longest error body kept in an [`LlmError::ApiError`] message
const MAX_BODY_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Rate limited by provider{}", retry_hint(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed JSON from provider: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// API error with the response body cut down to a readable size
    pub fn api(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            "(empty body)".to_string()
        } else if body.chars().count() > MAX_BODY_CHARS {
            let cut: String = body.chars().take(MAX_BODY_CHARS).collect();
            format!("{}...", cut)
        } else {
            body.to_string()
        };
        LlmError::ApiError { status, message }
    }
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(d) => format!(", retry after {}s", d.as_secs()),
        None => String::new(),
    }
}
