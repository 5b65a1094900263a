//! Code organization advice

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A loosely structured recommendation (class, function or module)
pub type AdviceRecord = serde_json::Map<String, serde_json::Value>;

/// Advice on how to organize the code for a task
///
/// Beyond field presence there is no schema: the record lists carry whatever
/// key/value pairs the model produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeOrganizationAdvice {
    /// File path -> purpose, in the order the model listed them
    pub file_structure: IndexMap<String, String>,
    pub classes: Vec<AdviceRecord>,
    pub functions: Vec<AdviceRecord>,
    pub modules: Vec<AdviceRecord>,
    pub design_patterns: Vec<String>,
    pub best_practices: Vec<String>,
}

impl CodeOrganizationAdvice {
    /// True when no section carries any entry
    pub fn is_empty(&self) -> bool {
        self.file_structure.is_empty()
            && self.classes.is_empty()
            && self.functions.is_empty()
            && self.modules.is_empty()
            && self.design_patterns.is_empty()
            && self.best_practices.is_empty()
    }

    /// Build a `{name, description: ""}` record
    pub fn named_record(name: impl Into<String>) -> AdviceRecord {
        let mut record = AdviceRecord::new();
        record.insert("name".to_string(), serde_json::Value::String(name.into()));
        record.insert("description".to_string(), serde_json::Value::String(String::new()));
        record
    }

    /// Display name of a record, if it has a string `name`
    pub fn record_name(record: &AdviceRecord) -> Option<&str> {
        record.get("name").and_then(|v| v.as_str())
    }
}
