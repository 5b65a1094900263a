//! Subtask - one unit of decomposed work
//!
//! Subtasks form a tree: each node exclusively owns its children. Children are
//! always freshly created by the analyzer, so the tree cannot contain cycles.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{Complexity, Priority};

/// A decomposed unit of work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Unique identifier within a run
    pub id: String,

    /// Brief title
    pub title: String,

    /// Detailed description
    pub description: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub complexity: Complexity,

    /// Free-text estimate such as "2 hours" or "3 days"
    #[serde(default)]
    pub estimated_time: Option<String>,

    /// Identifiers (or titles) of subtasks this one depends on; not enforced
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Nested subtasks, populated only by further decomposition
    #[serde(default)]
    pub sub_subtasks: Vec<Subtask>,

    #[serde(default)]
    pub is_complete: bool,
}

impl Subtask {
    /// Create a new subtask with a fresh identifier and default priority/complexity
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: title.into(),
            description: description.into(),
            priority: Priority::default(),
            complexity: Complexity::default(),
            estimated_time: None,
            dependencies: Vec::new(),
            sub_subtasks: Vec::new(),
            is_complete: false,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_complexity(mut self, complexity: Complexity) -> Self {
        self.complexity = complexity;
        self
    }

    pub fn with_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.estimated_time = Some(estimate.into());
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_children(mut self, children: Vec<Subtask>) -> Self {
        self.sub_subtasks = children;
        self
    }

    pub fn has_children(&self) -> bool {
        !self.sub_subtasks.is_empty()
    }

    /// True when the subtask is complex enough to decompose and has not been yet
    pub fn awaits_decomposition(&self) -> bool {
        self.complexity.is_decomposable() && self.sub_subtasks.is_empty()
    }

    /// Count this subtask and all of its descendants
    pub fn count_all(&self) -> usize {
        1 + self.sub_subtasks.iter().map(Subtask::count_all).sum::<usize>()
    }
}

/// Error raised when an LLM-provided subtask cannot be materialized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid subtask '{title}': {reason}")]
pub struct SpecError {
    pub title: String,
    pub reason: String,
}

/// Loosely typed subtask as returned by the model
///
/// Every field is optional; defaults are filled in by [`SubtaskSpec::materialize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtaskSpec {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub complexity: Option<String>,
    pub estimated_time: Option<String>,
    pub dependencies: Option<Vec<String>>,
}

impl SubtaskSpec {
    /// Turn the spec into a [`Subtask`] with a fresh identifier
    ///
    /// Missing priority becomes `medium`; missing complexity becomes
    /// `default_complexity`. Unknown priority or complexity words are rejected.
    pub fn materialize(self, default_complexity: Complexity) -> Result<Subtask, SpecError> {
        let title = self.title.unwrap_or_default();

        let priority = match self.priority.as_deref() {
            Some(p) => p.parse::<Priority>().map_err(|reason| SpecError {
                title: title.clone(),
                reason,
            })?,
            None => Priority::Medium,
        };

        let complexity = match self.complexity.as_deref() {
            Some(c) => c.parse::<Complexity>().map_err(|reason| SpecError {
                title: title.clone(),
                reason,
            })?,
            None => default_complexity,
        };

        let mut subtask = Subtask::new(title, self.description.unwrap_or_default())
            .with_priority(priority)
            .with_complexity(complexity)
            .with_dependencies(self.dependencies.unwrap_or_default());
        subtask.estimated_time = self.estimated_time;

        Ok(subtask)
    }
}

/// Materialize a batch of specs, failing on the first invalid one
pub fn materialize_all(specs: Vec<SubtaskSpec>, default_complexity: Complexity) -> Result<Vec<Subtask>, SpecError> {
    specs
        .into_iter()
        .map(|spec| spec.materialize(default_complexity))
        .collect()
}
