//! Prompt Loader
//!
//! Resolves templates from files or falls back to embedded defaults, and
//! renders request messages with Handlebars.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::config::ConfigError;

/// The three LLM calls a run makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    TaskDecomposition,
    SubtaskAnalysis,
    CodeOrganization,
}

impl PromptKind {
    pub const ALL: [PromptKind; 3] = [Self::TaskDecomposition, Self::SubtaskAnalysis, Self::CodeOrganization];

    /// Template name of the system prompt
    pub fn system_name(&self) -> &'static str {
        match self {
            Self::TaskDecomposition => "task_decomposition",
            Self::SubtaskAnalysis => "subtask_analysis",
            Self::CodeOrganization => "code_organization",
        }
    }

    /// Template name of the user request message
    pub fn request_name(&self) -> &'static str {
        match self {
            Self::TaskDecomposition => "decompose_request",
            Self::SubtaskAnalysis => "analyze_request",
            Self::CodeOrganization => "advise_request",
        }
    }
}

/// Variables for the decomposition request
#[derive(Debug, Clone, Serialize)]
pub struct DecomposeContext<'a> {
    pub task: &'a str,
}

/// Variables for the sub-analysis request
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeContext<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub complexity: &'a str,
}

/// Variables for the advice request
#[derive(Debug, Clone, Serialize)]
pub struct AdviseContext<'a> {
    pub task: &'a str,
    pub summary: &'a str,
}

/// Finds template files along the loading chain
pub struct PromptLoader {
    /// Search directories, highest precedence first
    dirs: Vec<PathBuf>,
}

impl PromptLoader {
    /// Create a loader rooted at `root`, optionally searching `extra_dir` first
    pub fn new(root: impl AsRef<Path>, extra_dir: Option<PathBuf>) -> Self {
        let root = root.as_ref();
        debug!(?root, ?extra_dir, "PromptLoader::new: called");

        let candidates = extra_dir
            .into_iter()
            .chain([root.join(".codeplanner/prompts"), root.join("prompts")]);

        let dirs = candidates
            .filter(|dir| {
                let exists = dir.is_dir();
                debug!(?dir, %exists, "PromptLoader::new: checking directory");
                exists
            })
            .collect();

        Self { dirs }
    }

    /// Create a loader that only uses embedded prompts (for testing)
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self { dirs: Vec::new() }
    }

    /// Load a template by name, first match along the chain wins
    pub fn load_template(&self, name: &str) -> Result<String, ConfigError> {
        debug!(%name, "PromptLoader::load_template: called");
        for dir in &self.dirs {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found on disk");
                return std::fs::read_to_string(&path).map_err(|e| ConfigError::InvalidTemplate {
                    name: name.to_string(),
                    reason: format!("failed to read {}: {}", path.display(), e),
                });
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        debug!(%name, "PromptLoader::load_template: not found anywhere");
        Err(ConfigError::MissingTemplate(name.to_string()))
    }

    /// Load every template a run needs
    ///
    /// Fails on the first missing or syntactically invalid template.
    pub fn load(&self) -> Result<Prompts, ConfigError> {
        debug!("PromptLoader::load: called");
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);

        let mut system = HashMap::new();
        for kind in PromptKind::ALL {
            system.insert(kind, self.load_template(kind.system_name())?);

            let name = kind.request_name();
            let request = self.load_template(name)?;
            hbs.register_template_string(name, request)
                .map_err(|e| ConfigError::InvalidTemplate {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
        }

        info!("Loaded {} prompt templates", system.len() * 2);
        Ok(Prompts { hbs, system })
    }
}

/// Loaded templates for a run
pub struct Prompts {
    hbs: Handlebars<'static>,
    system: HashMap<PromptKind, String>,
}

impl Prompts {
    /// Load everything from the embedded defaults
    pub fn embedded() -> Result<Self, ConfigError> {
        PromptLoader::embedded_only().load()
    }

    /// System prompt text for a call
    pub fn system(&self, kind: PromptKind) -> &str {
        self.system.get(&kind).map(String::as_str).unwrap_or_default()
    }

    /// Render the user request message for a call
    pub fn render_request<T: Serialize>(&self, kind: PromptKind, context: &T) -> Result<String, handlebars::RenderError> {
        debug!(?kind, "Prompts::render_request: called");
        let rendered = self.hbs.render(kind.request_name(), context)?;
        Ok(rendered.trim_end().to_string())
    }
}
