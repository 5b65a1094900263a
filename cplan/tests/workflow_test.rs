//! End-to-end workflow runs against a scripted LLM client

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use codeplanner::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use codeplanner::prompts::{PromptLoader, Prompts};
use codeplanner::report;
use codeplanner::{Complexity, Priority, Workflow};
use tempfile::TempDir;

/// Answers by looking at which prompt it was sent
struct ScriptedClient {
    decomposition: String,
    analysis: fn(&str) -> String,
    advice: String,
    log: Mutex<Vec<(String, String)>>,
}

impl ScriptedClient {
    fn new(decomposition: &str, analysis: fn(&str) -> String, advice: &str) -> Arc<Self> {
        Arc::new(Self {
            decomposition: decomposition.to_string(),
            analysis,
            advice: advice.to_string(),
            log: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().iter().map(|(kind, _)| kind.clone()).collect()
    }

    fn first_user_message(&self) -> String {
        self.log.lock().unwrap()[0].1.clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let user = request.messages[0].content.clone();
        let (kind, reply) = if user.starts_with("Task to decompose:") {
            ("decompose", self.decomposition.clone())
        } else if user.starts_with("Subtask to analyze:") {
            ("analyze", (self.analysis)(&user))
        } else if user.starts_with("Original Task:") {
            ("advise", self.advice.clone())
        } else {
            return Err(LlmError::InvalidResponse(format!("unexpected request: {}", user)));
        };
        self.log.lock().unwrap().push((kind.to_string(), user));
        Ok(CompletionResponse::text(reply))
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

const DECOMPOSITION: &str = r#"I broke the task down:

```json
{
  "subtasks": [
    {"title": "Data model", "description": "Posts and comments", "priority": "high", "complexity": "moderate", "estimated_time": "4 hours", "dependencies": []},
    {"title": "Editor", "description": "Rich text editing", "priority": "critical", "complexity": "very_complex", "estimated_time": "2 days", "dependencies": ["Data model"]},
    {"title": "Search", "description": "Full text search", "priority": "low", "complexity": "complex", "estimated_time": "1 day"}
  ]
}
```"#;

fn split_editor(user: &str) -> String {
    if user.contains("Title: Editor") {
        r#"```json
{"needs_decomposition": true, "reasoning": "large", "subtasks": [
  {"title": "Toolbar", "description": "Formatting buttons", "estimated_time": "3 hours"},
  {"title": "Autosave", "description": "Persist drafts", "complexity": "moderate", "estimated_time": "2 hours"}
]}
```"#
            .to_string()
    } else {
        r#"{"needs_decomposition": false, "subtasks": []}"#.to_string()
    }
}

const ADVICE_TEXT: &str = "\
File Structure:
src/models.rs: post and comment types
src/editor/mod.rs: editor state

Classes:
- Post
- Comment

Best Practices:
- Keep handlers thin
";

fn prompts() -> Arc<Prompts> {
    Arc::new(Prompts::embedded().unwrap())
}

#[tokio::test]
async fn test_blog_run_end_to_end() {
    let client = ScriptedClient::new(DECOMPOSITION, split_editor, ADVICE_TEXT);
    let state = Workflow::new(client.clone(), prompts()).run("Build a blog", 3).await;

    assert!(state.error_message.is_none(), "{:?}", state.error_message);
    assert!(state.processing_complete);

    // Search never splits, so a second pass runs and asks about Editor again
    assert_eq!(
        client.calls(),
        vec!["decompose", "analyze", "analyze", "analyze", "analyze", "advise"]
    );
    assert_eq!(state.analysis_depth, 3);

    let result = state.final_result.expect("final result");
    let editor = &result.main_subtasks()[1];
    assert_eq!(editor.priority, Priority::Critical);
    assert_eq!(editor.sub_subtasks.len(), 2);
    assert_eq!(editor.sub_subtasks[0].complexity, Complexity::Simple);
    assert_eq!(editor.sub_subtasks[1].complexity, Complexity::Moderate);
    assert!(result.main_subtasks()[2].sub_subtasks.is_empty());
    assert_eq!(result.total_subtask_count(), 5);

    // 4h + 16h + 3h + 2h + 8h = 33h = 1980 minutes
    assert_eq!(result.total_estimated_time(), "4.1 days");

    let advice = result.code_organization();
    assert_eq!(advice.file_structure.len(), 2);
    assert_eq!(advice.classes.len(), 2);
    assert_eq!(advice.best_practices, vec!["Keep handlers thin"]);

    // Critical is not named in the high-priority callout
    assert!(
        result
            .recommendations()
            .contains(&"Prioritize these high-priority tasks: Data model".to_string())
    );

    let md = report::to_markdown(&result);
    assert!(md.contains("### 2. Editor"));
    assert!(md.contains("  1. Toolbar - Formatting buttons"));
    assert!(md.contains("- **Dependencies:** Data model"));
}

#[tokio::test]
async fn test_depth_one_never_analyzes() {
    let client = ScriptedClient::new(DECOMPOSITION, split_editor, ADVICE_TEXT);
    let state = Workflow::new(client.clone(), prompts()).run("Build a blog", 1).await;

    assert_eq!(client.calls(), vec!["decompose", "advise"]);
    assert!(state.final_result.is_some());
    assert!(state.subtasks.iter().all(|s| s.sub_subtasks.is_empty()));
}

#[tokio::test]
async fn test_text_decomposition_still_completes() {
    let text = "\
Title: Set up repository
Description: Create the project skeleton
Priority: High
Complexity: Simple
- Write the parser
Complexity: Moderate
";
    let client = ScriptedClient::new(text, split_editor, "{}");
    let state = Workflow::new(client.clone(), prompts()).run("Write a parser", 3).await;

    let result = state.final_result.expect("final result");
    assert_eq!(result.main_subtasks().len(), 2);
    assert_eq!(result.main_subtasks()[0].priority, Priority::High);
    assert_eq!(result.total_estimated_time(), "Not estimated");
    assert!(result.code_organization().is_empty());
    assert_eq!(client.calls(), vec!["decompose", "advise"]);
}

#[tokio::test]
async fn test_unknown_complexity_fails_decomposition() {
    let client = ScriptedClient::new(
        r#"{"subtasks": [{"title": "x", "complexity": "enormous"}]}"#,
        split_editor,
        "{}",
    );
    let state = Workflow::new(client, prompts()).run("x", 3).await;

    let error = state.error_message.expect("error");
    assert!(error.starts_with("Error in task decomposition:"), "{error}");
    assert!(error.contains("enormous"), "{error}");
    assert!(state.processing_complete);
    assert!(state.final_result.is_none());
}

#[tokio::test]
async fn test_prompt_override_changes_request() {
    let root = TempDir::new().unwrap();
    let dir = root.path().join(".codeplanner/prompts");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("decompose_request.pmt"), "Task to decompose: {{task}} (urgent)").unwrap();

    let prompts = Arc::new(PromptLoader::new(root.path(), None).load().unwrap());
    let client = ScriptedClient::new(DECOMPOSITION, split_editor, ADVICE_TEXT);
    let state = Workflow::new(client.clone(), prompts).run("Build a blog", 1).await;

    assert!(state.final_result.is_some());
    assert_eq!(client.first_user_message(), "Task to decompose: Build a blog (urgent)");
}
