//! Domain types: subtasks, advice and analysis results

mod advice;
mod complexity;
mod priority;
mod result;
mod subtask;

pub use advice::{AdviceRecord, CodeOrganizationAdvice};
pub use complexity::Complexity;
pub use priority::Priority;
pub use result::AnalysisResult;
pub use subtask::{SpecError, Subtask, SubtaskSpec, materialize_all};
