//! Terminal artifact of a workflow run

use serde::{Deserialize, Serialize};

use super::{CodeOrganizationAdvice, Subtask};

/// Complete result of task analysis
///
/// Produced once by the finalize step and never modified afterwards; fields are
/// exposed through accessors only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    original_task: String,
    main_subtasks: Vec<Subtask>,
    code_organization: CodeOrganizationAdvice,
    total_estimated_time: String,
    complexity_score: f64,
    recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn new(
        original_task: impl Into<String>,
        main_subtasks: Vec<Subtask>,
        code_organization: CodeOrganizationAdvice,
        total_estimated_time: impl Into<String>,
        complexity_score: f64,
        recommendations: Vec<String>,
    ) -> Self {
        Self {
            original_task: original_task.into(),
            main_subtasks,
            code_organization,
            total_estimated_time: total_estimated_time.into(),
            complexity_score,
            recommendations,
        }
    }

    pub fn original_task(&self) -> &str {
        &self.original_task
    }

    pub fn main_subtasks(&self) -> &[Subtask] {
        &self.main_subtasks
    }

    pub fn code_organization(&self) -> &CodeOrganizationAdvice {
        &self.code_organization
    }

    pub fn total_estimated_time(&self) -> &str {
        &self.total_estimated_time
    }

    /// Overall complexity in [0, 1]
    pub fn complexity_score(&self) -> f64 {
        self.complexity_score
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// Number of subtasks across every level of the tree
    pub fn total_subtask_count(&self) -> usize {
        self.main_subtasks.iter().map(Subtask::count_all).sum()
    }
}
