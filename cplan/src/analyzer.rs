//! TaskAnalyzer - LLM-driven task decomposition and complexity scoring
//!
//! Breaks a free-text task into subtasks, decides whether complex subtasks
//! need a further split, and scores a subtask tree.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{Complexity, Subtask, materialize_all};
use crate::error::StepFailure;
use crate::llm::{CompletionRequest, LlmClient};
use crate::parser::{ParseOutcome, parse_decomposition, parse_subtask_analysis};
use crate::prompts::{AnalyzeContext, DecomposeContext, PromptKind, Prompts};

/// Default token ceiling for analyzer requests
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// TaskAnalyzer decomposes tasks and analyzes subtasks through an LLM
pub struct TaskAnalyzer {
    llm: Arc<dyn LlmClient>,
    prompts: Arc<Prompts>,
    max_tokens: u32,
}

impl TaskAnalyzer {
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

    /// Break a task into top-level subtasks
    ///
    /// Makes one LLM call. Every returned spec is materialized with a fresh
    /// id; one invalid spec fails the whole decomposition.
    pub async fn decompose(&self, task: &str) -> Result<Vec<Subtask>, StepFailure> {
        info!(task_len = task.len(), "Decomposing task");
        let user = self
            .prompts
            .render_request(PromptKind::TaskDecomposition, &DecomposeContext { task })?;
        let request = CompletionRequest::single_turn(
            self.prompts.system(PromptKind::TaskDecomposition),
            user,
            self.max_tokens,
        );

        let text = self.llm.complete(request).await?.into_step_text("decompose");

        let specs = match parse_decomposition(&text)? {
            ParseOutcome::Structured(specs) => specs,
            ParseOutcome::Degraded { value, reason } => {
                warn!(%reason, count = value.len(), "Decomposition recovered from plain text");
                value
            }
            ParseOutcome::Empty { reason } => {
                warn!(%reason, "Decomposition produced no subtasks");
                Vec::new()
            }
        };

        let subtasks = materialize_all(specs, Complexity::Moderate)?;
        info!(count = subtasks.len(), "Task decomposed");
        Ok(subtasks)
    }

    /// Decide whether a subtask needs splitting and attach the children
    ///
    /// Simple and moderate subtasks come back unchanged without an LLM call.
    /// An unparsable reply also leaves the subtask unchanged.
    pub async fn analyze_subtask(&self, subtask: Subtask) -> Result<Subtask, StepFailure> {
        debug!(title = %subtask.title, complexity = %subtask.complexity, "analyze_subtask: called");
        if !subtask.complexity.is_decomposable() {
            debug!("analyze_subtask: below decomposition threshold, skipping");
            return Ok(subtask);
        }

        let user = self.prompts.render_request(
            PromptKind::SubtaskAnalysis,
            &AnalyzeContext {
                title: &subtask.title,
                description: &subtask.description,
                complexity: subtask.complexity.as_str(),
            },
        )?;
        let request = CompletionRequest::single_turn(
            self.prompts.system(PromptKind::SubtaskAnalysis),
            user,
            self.max_tokens,
        );

        let text = self.llm.complete(request).await?.into_step_text("analyze");
        let analysis = parse_subtask_analysis(&text).value_or_default();

        if !analysis.needs_decomposition {
            debug!(title = %subtask.title, "analyze_subtask: no decomposition needed");
            return Ok(subtask);
        }

        let children = materialize_all(analysis.subtasks, Complexity::Simple)?;
        info!(title = %subtask.title, children = children.len(), "Subtask decomposed further");
        Ok(subtask.with_children(children))
    }

    /// Weighted complexity of a subtask tree, in [0, 1]
    ///
    /// A subtask with children averages its own base score with its
    /// children's score and weighs 1 plus its direct child count. An empty
    /// list scores 0.0.
    pub fn complexity_score(subtasks: &[Subtask]) -> f64 {
        let (total, weight) = subtasks.iter().fold((0.0, 0usize), |(total, weight), subtask| {
            let mut score = subtask.complexity.base_score();
            let mut w = 1;
            if subtask.has_children() {
                score = (score + Self::complexity_score(&subtask.sub_subtasks)) / 2.0;
                w += subtask.sub_subtasks.len();
            }
            (total + score * w as f64, weight + w)
        });

        if weight == 0 { 0.0 } else { total / weight as f64 }
    }
}
