//! Codeplanner - LLM-driven task decomposition and code organization advice
//!
//! Codeplanner takes a free-text software task, asks a language model to
//! break it into subtasks, splits complex subtasks further, scores the
//! resulting tree and asks for advice on how to organize the code.
//!
//! # Core Concepts
//!
//! - **Four steps**: decompose, analyze (repeatable), advise, finalize
//! - **One call at a time**: every LLM request is awaited before the next
//! - **Degrade, don't crash**: unparsable replies fall back to text heuristics
//! - **Per-run configuration**: provider and model travel with the run
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait, provider clients and model catalog
//! - [`parser`] - JSON extraction and heuristic fallback parsers
//! - [`analyzer`] - Decomposition, sub-analysis and complexity scoring
//! - [`advisor`] - Code organization advice, recommendations, time totals
//! - [`workflow`] - The step state machine
//! - [`report`] - JSON and Markdown export
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod advisor;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
pub mod parser;
pub mod prompts;
pub mod report;
pub mod workflow;

pub use advisor::CodeAdvisor;
pub use analyzer::TaskAnalyzer;
pub use config::{Config, ConfigError};
pub use domain::{AnalysisResult, CodeOrganizationAdvice, Complexity, Priority, Subtask};
pub use error::StepFailure;
pub use workflow::{Workflow, WorkflowState};
