//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEPTH_RANGE;

/// Codeplanner - LLM-driven task decomposition and code organization advice
#[derive(Parser)]
#[command(
    name = "cplan",
    about = "Break a development task into subtasks, score its complexity and get code organization advice",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/codeplanner/logs/codeplanner.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Analyze a task description
    Analyze {
        /// The task to decompose
        task: String,

        /// Maximum analysis depth (1-5)
        #[arg(short = 'd', long, value_parser = parse_depth)]
        max_depth: Option<u32>,

        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,

        /// Provider: openai, google, anthropic or auto (overrides config)
        #[arg(short, long)]
        provider: Option<String>,

        /// Sampling temperature (overrides config)
        #[arg(short, long)]
        temperature: Option<f32>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List known models per provider
    Models {
        /// Only list models for this provider
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Validate provider, model and API key configuration
    Check {
        /// Model to check (overrides config)
        #[arg(short, long)]
        model: Option<String>,

        /// Provider to check (overrides config)
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// Print the workflow diagram
    Graph,
}

fn parse_depth(s: &str) -> Result<u32, String> {
    let depth: u32 = s.parse().map_err(|_| format!("Invalid depth: {}", s))?;
    if DEPTH_RANGE.contains(&depth) {
        Ok(depth)
    } else {
        Err(format!(
            "Depth must be between {} and {}",
            DEPTH_RANGE.start(),
            DEPTH_RANGE.end()
        ))
    }
}

/// Output format for analysis results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            _ => Err(format!("Unknown format: {}. Use: text, json, or markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}
