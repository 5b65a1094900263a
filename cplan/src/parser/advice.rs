//! Parsing of code-organization advice replies

use serde_json::Value;
use tracing::{debug, warn};

use super::{ParseError, ParseOutcome, extract_json_payload, json_kind};
use crate::domain::CodeOrganizationAdvice;

/// Sections recognized by the heuristic parser, in match order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    FileStructure,
    Classes,
    Functions,
    Modules,
    DesignPatterns,
    BestPractices,
}

impl Section {
    const HEADERS: [(&'static str, Section); 6] = [
        ("file structure", Section::FileStructure),
        ("classes", Section::Classes),
        ("functions", Section::Functions),
        ("modules", Section::Modules),
        ("design patterns", Section::DesignPatterns),
        ("best practices", Section::BestPractices),
    ];

    fn detect(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        Self::HEADERS
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, section)| *section)
    }
}

/// Parse an advice reply
///
/// Decodable JSON must match the advice shape or the parse fails. Text that
/// is not JSON goes through [`parse_advice_sections`], which cannot fail.
pub fn parse_advice(text: &str) -> Result<ParseOutcome<CodeOrganizationAdvice>, ParseError> {
    debug!(text_len = text.len(), "parse_advice: called");
    let payload = extract_json_payload(text);

    match serde_json::from_str::<Value>(payload) {
        Ok(value @ Value::Object(_)) => Ok(ParseOutcome::Structured(serde_json::from_value(value)?)),
        Ok(other) => Err(ParseError::NotAnObject(json_kind(&other))),
        Err(e) => {
            warn!(error = %e, "Advice reply is not JSON, falling back to section parsing");
            let advice = parse_advice_sections(text);
            let reason = e.to_string();
            if advice.is_empty() {
                Ok(ParseOutcome::Empty { reason })
            } else {
                Ok(ParseOutcome::Degraded { value: advice, reason })
            }
        }
    }
}

/// Heuristic section parser for free-text advice
///
/// Each trimmed non-empty line is, in order of precedence: a section header
/// (case-insensitive substring), a `- ` / `* ` bullet for the current list
/// section, or a `path: description` entry inside the file-structure
/// section. Anything else is skipped.
pub fn parse_advice_sections(text: &str) -> CodeOrganizationAdvice {
    debug!(text_len = text.len(), "parse_advice_sections: called");
    let mut advice = CodeOrganizationAdvice::default();
    let mut current: Option<Section> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(section) = Section::detect(line) {
            current = Some(section);
            continue;
        }

        if let Some(item) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
            let item = item.trim();
            match current {
                Some(Section::Classes) => advice.classes.push(CodeOrganizationAdvice::named_record(item)),
                Some(Section::Functions) => advice.functions.push(CodeOrganizationAdvice::named_record(item)),
                Some(Section::Modules) => advice.modules.push(CodeOrganizationAdvice::named_record(item)),
                Some(Section::DesignPatterns) => advice.design_patterns.push(item.to_string()),
                Some(Section::BestPractices) => advice.best_practices.push(item.to_string()),
                Some(Section::FileStructure) | None => {}
            }
            continue;
        }

        if current == Some(Section::FileStructure)
            && let Some((path, description)) = line.split_once(':')
        {
            advice
                .file_structure
                .insert(path.trim().to_string(), description.trim().to_string());
        }
    }

    advice
}
