//! Codeplanner - LLM-driven task decomposition
//!
//! CLI entry point for analyzing tasks and inspecting configuration.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use codeplanner::cli::{Cli, Command, OutputFormat};
use codeplanner::config::{Config, LlmOverrides};
use codeplanner::domain::{AnalysisResult, CodeOrganizationAdvice};
use codeplanner::llm::catalog::{available_models, validate_configuration};
use codeplanner::llm::{Provider, create_client};
use codeplanner::prompts::PromptLoader;
use codeplanner::report;
use codeplanner::workflow::{WORKFLOW_DIAGRAM, Workflow};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("codeplanner")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to the log file; stdout carries results
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("codeplanner.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "Codeplanner loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Command::Analyze {
            task,
            max_depth,
            model,
            provider,
            temperature,
            format,
            output,
        } => {
            let overrides = LlmOverrides {
                provider,
                model,
                temperature,
            };
            let depth = max_depth.unwrap_or(config.analysis.max_depth);
            run_analyze(&config, &overrides, &task, depth, format, output).await
        }
        Command::Models { provider } => run_models(provider.as_deref()),
        Command::Check { model, provider } => run_check(
            &config,
            &LlmOverrides {
                provider,
                model,
                temperature: None,
            },
        ),
        Command::Graph => {
            println!("{}", WORKFLOW_DIAGRAM);
            Ok(())
        }
    }
}

async fn run_analyze(
    config: &Config,
    overrides: &LlmOverrides,
    task: &str,
    max_depth: u32,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let resolved = config.validate(overrides, max_depth)?;
    info!(provider = %resolved.provider, model = %resolved.model, %max_depth, "Starting analysis");

    let client = create_client(&resolved)?;
    let root = std::env::current_dir().context("Failed to read current directory")?;
    let prompts = PromptLoader::new(root, config.prompts.dir.clone()).load()?;

    let workflow = Workflow::new(client, Arc::new(prompts)).with_max_tokens(resolved.max_tokens);
    let state = workflow.run(task, max_depth).await;

    if let Some(error) = &state.error_message {
        eprintln!("{} {}", "Error:".red().bold(), error);
        std::process::exit(1);
    }
    let Some(result) = state.final_result else {
        eprintln!("{} analysis produced no result", "Error:".red().bold());
        std::process::exit(1);
    };

    let rendered = match format {
        OutputFormat::Text => render_text(&result),
        OutputFormat::Json => report::to_json(&result).context("Failed to serialize result")?,
        OutputFormat::Markdown => report::to_markdown(&result),
    };

    match output {
        Some(path) => {
            fs::write(&path, rendered).context(format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Report written to".green(), path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

fn run_models(provider: Option<&str>) -> Result<()> {
    let filter = provider.map(str::parse::<Provider>).transpose()?;

    for (provider, models) in available_models() {
        if filter.is_some_and(|f| f != provider) {
            continue;
        }
        println!("{}", provider.as_str().bold());
        for model in models {
            println!("  {}", model);
        }
    }
    Ok(())
}

fn run_check(config: &Config, overrides: &LlmOverrides) -> Result<()> {
    let resolved = config.llm.resolve(overrides)?;
    println!("Provider: {}", resolved.provider);
    println!("Model:    {}", resolved.model);
    println!("API key:  ${}", resolved.api_key_env);

    match validate_configuration(&resolved) {
        Ok(()) => {
            println!("{}", "Configuration OK".green());
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {}", "Configuration invalid:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn render_text(result: &AnalysisResult) -> String {
    let mut lines = vec![
        format!("{}", "Task Analysis".bold().underline()),
        format!("{} {}", "Task:".bold(), result.original_task()),
        format!("{} {:.2}/1.0", "Complexity:".bold(), result.complexity_score()),
        format!("{} {}", "Estimated time:".bold(), result.total_estimated_time()),
        format!(
            "{} {} ({} including sub-subtasks)",
            "Subtasks:".bold(),
            result.main_subtasks().len(),
            result.total_subtask_count()
        ),
        String::new(),
    ];

    for (i, subtask) in result.main_subtasks().iter().enumerate() {
        lines.push(format!(
            "{}. {} [{} / {}]",
            i + 1,
            subtask.title.cyan().bold(),
            subtask.priority,
            subtask.complexity
        ));
        if !subtask.description.is_empty() {
            lines.push(format!("   {}", subtask.description));
        }
        if let Some(estimate) = subtask.estimated_time.as_deref().filter(|e| !e.is_empty()) {
            lines.push(format!("   {} {}", "time:".dimmed(), estimate));
        }
        for child in &subtask.sub_subtasks {
            lines.push(format!("   - {} {}", child.title, format!("({})", child.complexity).dimmed()));
        }
    }

    let advice = result.code_organization();
    if !advice.file_structure.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}", "File structure".bold()));
        for (path, description) in &advice.file_structure {
            lines.push(format!("  {} {}", path.yellow(), description));
        }
    }

    let named = [
        ("Classes", &advice.classes),
        ("Functions", &advice.functions),
        ("Modules", &advice.modules),
    ];
    for (heading, records) in named {
        if records.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{}", heading.bold()));
        for record in records {
            let name = CodeOrganizationAdvice::record_name(record).unwrap_or("(unnamed)");
            let description = record.get("description").and_then(|d| d.as_str()).unwrap_or_default();
            if description.is_empty() {
                lines.push(format!("  - {}", name));
            } else {
                lines.push(format!("  - {}: {}", name, description));
            }
        }
    }

    for (heading, items) in [
        ("Design patterns", advice.design_patterns.as_slice()),
        ("Best practices", advice.best_practices.as_slice()),
        ("Recommendations", result.recommendations()),
    ] {
        if items.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("{}", heading.bold()));
        for item in items {
            lines.push(format!("  - {}", item));
        }
    }

    lines.join("\n")
}
