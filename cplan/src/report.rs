//! Export of analysis results as JSON or a Markdown report

use tracing::debug;

use crate::domain::AnalysisResult;

const NOT_ESTIMATED: &str = "Not estimated";

/// Pretty-printed JSON of a result
pub fn to_json(result: &AnalysisResult) -> serde_json::Result<String> {
    debug!("to_json: called");
    serde_json::to_string_pretty(result)
}

/// Markdown report of a result
pub fn to_markdown(result: &AnalysisResult) -> String {
    debug!(subtasks = result.main_subtasks().len(), "to_markdown: called");
    let total_time = match result.total_estimated_time() {
        "" => NOT_ESTIMATED,
        t => t,
    };

    let mut md = format!(
        "# Task Analysis Report\n\n\
         ## Original Task\n{}\n\n\
         ## Overview\n\
         - **Complexity Score:** {:.2}/1.0\n\
         - **Total Estimated Time:** {}\n\
         - **Main Subtasks:** {}\n\n\
         ## Task Breakdown\n",
        result.original_task(),
        result.complexity_score(),
        total_time,
        result.main_subtasks().len(),
    );

    for (i, subtask) in result.main_subtasks().iter().enumerate() {
        md.push_str(&format!(
            "\n### {}. {}\n\
             - **Description:** {}\n\
             - **Priority:** {}\n\
             - **Complexity:** {}\n\
             - **Estimated Time:** {}\n",
            i + 1,
            subtask.title,
            subtask.description,
            subtask.priority,
            subtask.complexity,
            subtask
                .estimated_time
                .as_deref()
                .filter(|e| !e.is_empty())
                .unwrap_or(NOT_ESTIMATED),
        ));

        if !subtask.dependencies.is_empty() {
            md.push_str(&format!("- **Dependencies:** {}\n", subtask.dependencies.join(", ")));
        }

        if subtask.has_children() {
            md.push_str("\n**Sub-subtasks:**\n");
            for (j, child) in subtask.sub_subtasks.iter().enumerate() {
                md.push_str(&format!("  {}. {} - {}\n", j + 1, child.title, child.description));
            }
        }
    }

    if !result.recommendations().is_empty() {
        md.push_str("\n## Recommendations\n");
        for rec in result.recommendations() {
            md.push_str(&format!("- {}\n", rec));
        }
    }

    md
}
