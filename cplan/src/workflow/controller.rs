//! Workflow - drives a run through decompose, analyze, advise and finalize

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::state::{Step, WorkflowState};
use crate::advisor::{CodeAdvisor, generate_recommendations, total_estimated_time};
use crate::analyzer::TaskAnalyzer;
use crate::domain::AnalysisResult;
use crate::llm::LlmClient;
use crate::prompts::Prompts;

/// Text diagram of the pipeline, printed by `cplan graph`
pub const WORKFLOW_DIAGRAM: &str = r#"
codeplanner workflow
====================

  (start)
     |
     v
 +-----------+
 | decompose |  split the task into subtasks
 +-----------+
     |  failure -------------------------------> (end)
     v
 +-----------+
 |  analyze  |  split complex subtasks further
 +-----------+ <--+
     |            |  complex subtasks without children
     |            |  and depth below the limit
     +------------+
     |  error or complete ---------------------> (end)
     v
 +-----------+
 |  advise   |  code organization advice
 +-----------+
     |
     v
 +-----------+
 | finalize  |  score, recommendations, total time
 +-----------+
     |
     v
   (end)
"#;

/// Four-step analysis pipeline over a single LLM client
pub struct Workflow {
    analyzer: TaskAnalyzer,
    advisor: CodeAdvisor,
}

impl Workflow {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: Arc<Prompts>) -> Self {
        Self {
            analyzer: TaskAnalyzer::new(llm.clone(), prompts.clone()),
            advisor: CodeAdvisor::new(llm, prompts),
        }
    }

    /// Set the token ceiling for every request of the run
    pub fn with_max_tokens(self, max_tokens: u32) -> Self {
        Self {
            analyzer: self.analyzer.with_max_tokens(max_tokens),
            advisor: self.advisor.with_max_tokens(max_tokens),
        }
    }

    /// Run the whole pipeline for a task
    ///
    /// Never fails: step failures end the run early and are reported through
    /// `error_message` on the returned state.
    pub async fn run(&self, task: &str, max_depth: u32) -> WorkflowState {
        info!(%max_depth, "Starting workflow run");
        let mut state = WorkflowState::new(task, max_depth);
        let mut step = Step::Decompose;

        while step != Step::End {
            debug!(%step, depth = state.analysis_depth, "run: entering step");
            state = match step {
                Step::Decompose => self.decompose(state).await,
                Step::Analyze => self.analyze(state).await,
                Step::Advise => self.advise(state).await,
                Step::Finalize => self.finalize(state),
                Step::End => state,
            };
            step = step.next(&state);
        }

        match &state.error_message {
            Some(error) => warn!(%error, "Workflow ended with an error"),
            None => info!(subtasks = state.subtasks.len(), "Workflow complete"),
        }
        state
    }

    async fn decompose(&self, mut state: WorkflowState) -> WorkflowState {
        match self.analyzer.decompose(&state.current_task).await {
            Ok(subtasks) => {
                state.subtasks = subtasks;
                state.analysis_depth += 1;
                state.error_message = None;
                state
            }
            Err(e) => state.fail(format!("Error in task decomposition: {}", e)),
        }
    }

    async fn analyze(&self, mut state: WorkflowState) -> WorkflowState {
        if state.subtasks.is_empty() {
            state.error_message = Some("No subtasks to analyze".to_string());
            return state;
        }

        if state.analysis_depth >= state.max_depth {
            debug!(depth = state.analysis_depth, "analyze: depth limit reached, passing through");
            return state;
        }

        // One call at a time, in subtask order
        let mut analyzed = Vec::with_capacity(state.subtasks.len());
        for subtask in std::mem::take(&mut state.subtasks) {
            match self.analyzer.analyze_subtask(subtask).await {
                Ok(subtask) => analyzed.push(subtask),
                Err(e) => return state.fail(format!("Error in subtask analysis: {}", e)),
            }
        }

        state.subtasks = analyzed;
        state.analysis_depth += 1;
        state.error_message = None;
        info!(depth = state.analysis_depth, "Analysis pass complete");
        state
    }

    async fn advise(&self, mut state: WorkflowState) -> WorkflowState {
        if state.subtasks.is_empty() {
            state.error_message = Some("No subtasks available for code advice".to_string());
            return state;
        }

        match self.advisor.generate_advice(&state.current_task, &state.subtasks).await {
            Ok(advice) => {
                state.code_advice = Some(advice);
                state.error_message = None;
                state
            }
            Err(e) => state.fail(format!("Error generating code advice: {}", e)),
        }
    }

    fn finalize(&self, mut state: WorkflowState) -> WorkflowState {
        // Keep an earlier step's error visible
        if state.is_error() {
            return state;
        }

        let Some(advice) = state.code_advice.clone() else {
            state.error_message = Some("Missing required data for finalization".to_string());
            return state;
        };
        if state.subtasks.is_empty() {
            state.error_message = Some("Missing required data for finalization".to_string());
            return state;
        }

        let score = TaskAnalyzer::complexity_score(&state.subtasks);
        let recommendations = generate_recommendations(&state.subtasks, score);
        let total_time = total_estimated_time(&state.subtasks);

        state.final_result = Some(AnalysisResult::new(
            state.current_task.clone(),
            state.subtasks.clone(),
            advice,
            total_time,
            score,
            recommendations,
        ));
        state.processing_complete = true;
        state.error_message = None;
        info!(%score, "Analysis result finalized");
        state
    }
}
