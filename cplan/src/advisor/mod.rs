//! CodeAdvisor - code organization advice and run-level summaries
//!
//! Asks the LLM how to lay out the code for a decomposed task, and derives
//! the fixed-rule recommendations and the total time estimate.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::analyzer::DEFAULT_MAX_TOKENS;
use crate::domain::{CodeOrganizationAdvice, Subtask};
use crate::error::StepFailure;
use crate::llm::{CompletionRequest, LlmClient};
use crate::parser::{ParseOutcome, parse_advice};
use crate::prompts::{AdviseContext, PromptKind, Prompts};

mod estimate;
mod recommendations;

pub use estimate::{parse_minutes, total_estimated_time};
pub use recommendations::generate_recommendations;

/// CodeAdvisor produces code organization advice through an LLM
pub struct CodeAdvisor {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<Prompts>,
    max_tokens: u32,
}

impl CodeAdvisor {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<Prompts>) -> Self {
        Self {
            llm,
            prompts,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Ask for code organization advice for a task and its subtasks
    ///
    /// A JSON reply with the wrong shape fails; a free-text reply is parsed
    /// section by section and never fails.
    pub async fn generate_advice(&self, task: &str, subtasks: &[Subtask]) -> Result<CodeOrganizationAdvice, StepFailure> {
        info!(subtasks = subtasks.len(), "Generating code organization advice");
        let summary = subtasks_summary(subtasks);
        let user = self.prompts.render_request(
            PromptKind::CodeOrganization,
            &AdviseContext {
                task,
                summary: &summary,
            },
        )?;
        let request = CompletionRequest::single_turn(
            self.prompts.system(PromptKind::CodeOrganization),
            user,
            self.max_tokens,
        );

        let text = self.llm.complete(request).await?.into_step_text("advise");

        let advice = match parse_advice(&text)? {
            ParseOutcome::Structured(advice) => advice,
            ParseOutcome::Degraded { value, reason } => {
                warn!(%reason, "Advice recovered from plain text");
                value
            }
            ParseOutcome::Empty { reason } => {
                warn!(%reason, "No advice could be recovered");
                CodeOrganizationAdvice::default()
            }
        };
        Ok(advice)
    }
}

/// Numbered plain-text summary of the subtasks, one level of children inline
pub fn subtasks_summary(subtasks: &[Subtask]) -> String {
    debug!(count = subtasks.len(), "subtasks_summary: called");
    let mut lines = Vec::new();

    for (i, subtask) in subtasks.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, subtask.title));
        lines.push(format!("   Description: {}", subtask.description));
        lines.push(format!("   Complexity: {}", subtask.complexity));
        lines.push(format!("   Priority: {}", subtask.priority));

        if subtask.has_children() {
            lines.push("   Sub-subtasks:".to_string());
            for (j, child) in subtask.sub_subtasks.iter().enumerate() {
                lines.push(format!("   - {}. {}", j + 1, child.title));
                lines.push(format!("     Description: {}", child.description));
            }
        }

        lines.push(String::new());
    }

    lines.join("\n")
}
