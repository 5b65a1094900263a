//! Workflow state, steps and routing

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AnalysisResult, CodeOrganizationAdvice, Subtask};

/// Everything a run knows at a step boundary
///
/// Steps take the state by value and return the updated state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub current_task: String,
    pub subtasks: Vec<Subtask>,
    pub analysis_depth: u32,
    pub max_depth: u32,
    pub code_advice: Option<CodeOrganizationAdvice>,
    pub final_result: Option<AnalysisResult>,
    pub error_message: Option<String>,
    pub processing_complete: bool,
}

impl WorkflowState {
    pub fn new(task: impl Into<String>, max_depth: u32) -> Self {
        Self {
            current_task: task.into(),
            subtasks: Vec::new(),
            analysis_depth: 0,
            max_depth,
            code_advice: None,
            final_result: None,
            error_message: None,
            processing_complete: false,
        }
    }

    /// Record a failure and stop the run
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self.processing_complete = true;
        self
    }

    pub fn is_error(&self) -> bool {
        self.error_message.is_some()
    }

    /// Any subtask still waiting for a decomposition decision
    pub fn needs_analysis(&self) -> bool {
        self.subtasks.iter().any(Subtask::awaits_decomposition)
    }

    /// Decide where to go after an analysis pass
    pub fn route(&self) -> Route {
        let route = if self.is_error() {
            Route::Error
        } else if self.processing_complete {
            Route::Complete
        } else if !self.subtasks.is_empty() && self.analysis_depth < self.max_depth && self.needs_analysis() {
            Route::ContinueAnalysis
        } else {
            Route::GenerateAdvice
        };
        debug!(?route, depth = self.analysis_depth, max_depth = self.max_depth, "route: decided");
        route
    }
}

/// Branch taken after the analysis step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Error,
    Complete,
    ContinueAnalysis,
    GenerateAdvice,
}

/// Pipeline positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Decompose,
    Analyze,
    Advise,
    Finalize,
    End,
}

impl Step {
    /// Transition taken after this step has run on `state`
    pub fn next(self, state: &WorkflowState) -> Step {
        match self {
            Step::Decompose if state.is_error() => Step::End,
            Step::Decompose => Step::Analyze,
            Step::Analyze => match state.route() {
                Route::ContinueAnalysis => Step::Analyze,
                Route::GenerateAdvice => Step::Advise,
                Route::Error | Route::Complete => Step::End,
            },
            Step::Advise => Step::Finalize,
            Step::Finalize | Step::End => Step::End,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::Decompose => "decompose",
            Step::Analyze => "analyze",
            Step::Advise => "advise",
            Step::Finalize => "finalize",
            Step::End => "end",
        };
        write!(f, "{}", name)
    }
}
