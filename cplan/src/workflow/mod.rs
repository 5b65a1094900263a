//! Workflow Controller
//!
//! Explicit state machine over the four pipeline steps. The only branch is
//! after analysis, where [`Route`] decides between another analysis pass,
//! advice generation, or ending the run.

mod controller;
mod state;

pub use controller::{WORKFLOW_DIAGRAM, Workflow};
pub use state::{Route, Step, WorkflowState};
