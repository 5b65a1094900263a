//! Failures inside a workflow step
//!
//! A step catches these at its boundary and records them on the workflow
//! state; they never escape a run.

use thiserror::Error;

use crate::domain::SpecError;
use crate::llm::LlmError;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum StepFailure {
    #[error("LLM request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Failed to render prompt: {0}")]
    Prompt(#[from] handlebars::RenderError),

    #[error("Malformed response: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Spec(#[from] SpecError),
}
