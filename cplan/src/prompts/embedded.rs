//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System prompt for breaking a task into subtasks
pub const TASK_DECOMPOSITION: &str = include_str!("../../prompts/task_decomposition.pmt");

/// System prompt for deciding whether a subtask needs splitting
pub const SUBTASK_ANALYSIS: &str = include_str!("../../prompts/subtask_analysis.pmt");

/// System prompt for code organization advice
pub const CODE_ORGANIZATION: &str = include_str!("../../prompts/code_organization.pmt");

pub const DECOMPOSE_REQUEST: &str = include_str!("../../prompts/decompose_request.pmt");
pub const ANALYZE_REQUEST: &str = include_str!("../../prompts/analyze_request.pmt");
pub const ADVISE_REQUEST: &str = include_str!("../../prompts/advise_request.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    let found = match name {
        "task_decomposition" => Some(TASK_DECOMPOSITION),
        "subtask_analysis" => Some(SUBTASK_ANALYSIS),
        "code_organization" => Some(CODE_ORGANIZATION),
        "decompose_request" => Some(DECOMPOSE_REQUEST),
        "analyze_request" => Some(ANALYZE_REQUEST),
        "advise_request" => Some(ADVISE_REQUEST),
        _ => None,
    };
    if found.is_none() {
        debug!("get_embedded: no match found");
    }
    found
}
