//! Prompt Template System
//!
//! Loads the system prompts and the Handlebars request templates for the
//! three LLM calls of a run.
//!
//! Template loading chain:
//! 1. Configured prompt directory (`prompts.dir`), when set
//! 2. `.codeplanner/prompts/{name}.pmt` (user override)
//! 3. `prompts/{name}.pmt` (repo default)
//! 4. Embedded fallback in code

pub mod embedded;
mod loader;

pub use loader::{AdviseContext, AnalyzeContext, DecomposeContext, PromptKind, PromptLoader, Prompts};
