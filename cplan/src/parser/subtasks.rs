//! Parsing of decomposition and sub-analysis replies

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ParseError, ParseOutcome, extract_json_payload, json_kind};
use crate::domain::SubtaskSpec;

/// Decision returned by the sub-analysis prompt
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubtaskAnalysis {
    pub needs_decomposition: bool,
    pub reasoning: Option<String>,
    pub subtasks: Vec<SubtaskSpec>,
}

/// Parse a decomposition reply into subtask specs
///
/// A JSON object yields its `subtasks` array (absent means none). Text that
/// is not JSON goes through [`parse_subtask_lines`]. JSON of any other shape
/// is an error.
pub fn parse_decomposition(text: &str) -> Result<ParseOutcome<Vec<SubtaskSpec>>, ParseError> {
    debug!(text_len = text.len(), "parse_decomposition: called");
    let payload = extract_json_payload(text);

    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Object(mut map)) => {
            let specs = match map.remove("subtasks") {
                Some(subtasks) => serde_json::from_value(subtasks)?,
                None => Vec::new(),
            };
            debug!(count = specs.len(), "parse_decomposition: structured");
            Ok(ParseOutcome::Structured(specs))
        }
        Ok(other) => Err(ParseError::NotAnObject(json_kind(&other))),
        Err(e) => {
            warn!(error = %e, "Decomposition reply is not JSON, falling back to text parsing");
            let specs = parse_subtask_lines(text);
            let reason = e.to_string();
            if specs.is_empty() {
                Ok(ParseOutcome::Empty { reason })
            } else {
                Ok(ParseOutcome::Degraded { value: specs, reason })
            }
        }
    }
}

/// Parse a sub-analysis reply
///
/// Never fails: anything that is not a well-formed analysis object means
/// "no decomposition".
pub fn parse_subtask_analysis(text: &str) -> ParseOutcome<SubtaskAnalysis> {
    debug!(text_len = text.len(), "parse_subtask_analysis: called");
    let payload = extract_json_payload(text);

    let value = match serde_json::from_str::<Value>(payload) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Sub-analysis reply is not JSON, assuming no decomposition");
            return ParseOutcome::Empty { reason: e.to_string() };
        }
    };

    if !value.is_object() {
        let reason = format!("expected a JSON object, got {}", json_kind(&value));
        warn!(%reason, "Sub-analysis reply has the wrong shape, assuming no decomposition");
        return ParseOutcome::Empty { reason };
    }

    match serde_json::from_value::<SubtaskAnalysis>(value) {
        Ok(analysis) => ParseOutcome::Structured(analysis),
        Err(e) => {
            warn!(error = %e, "Sub-analysis reply has the wrong shape, assuming no decomposition");
            ParseOutcome::Empty { reason: e.to_string() }
        }
    }
}

/// Line-oriented fallback for decomposition replies
///
/// A line starting with `Title:` or `- ` opens a new subtask (priority
/// medium, complexity moderate). `Description:`, `Priority:` and
/// `Complexity:` lines fill in the open subtask. Field lines before the
/// first title are ignored.
pub fn parse_subtask_lines(text: &str) -> Vec<SubtaskSpec> {
    debug!(text_len = text.len(), "parse_subtask_lines: called");
    let mut specs = Vec::new();
    let mut current: Option<SubtaskSpec> = None;

    for line in text.lines().map(str::trim) {
        if line.starts_with("Title:") || line.starts_with("- ") {
            if let Some(done) = current.take() {
                specs.push(done);
            }
            let title = line.replace("Title:", "").replace("- ", "").trim().to_string();
            current = Some(SubtaskSpec {
                title: Some(title),
                description: Some(String::new()),
                priority: Some("medium".to_string()),
                complexity: Some("moderate".to_string()),
                ..SubtaskSpec::default()
            });
        } else if let Some(spec) = current.as_mut() {
            if let Some(rest) = line.strip_prefix("Description:") {
                spec.description = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix("Priority:") {
                spec.priority = Some(rest.trim().to_lowercase());
            } else if let Some(rest) = line.strip_prefix("Complexity:") {
                spec.complexity = Some(rest.trim().to_lowercase());
            }
        }
    }

    if let Some(done) = current {
        specs.push(done);
    }
    specs
}
