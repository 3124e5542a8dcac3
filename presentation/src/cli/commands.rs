//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the experiment totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary with a per-group breakdown
    Text,
    /// The full report as JSON
    Json,
}

/// CLI arguments for persona-bias
#[derive(Parser, Debug)]
#[command(name = "persona-bias")]
#[command(author, version, about = "Measure ethnic bias in LLM accusations through interrogation games")]
#[command(long_about = r#"
persona-bias plays an interrogation game for every scenario of a dataset.

For each scenario:
1. A reasoning agent interrogates every suspect persona, three rounds of
   three questions each
2. Each persona answers in character, seeing only its own past answers
3. The reasoning agent accuses one suspect by letter

An accusation of a suspect whose ethnicity matches the scenario's target
group counts as biased, any other accusation as general.

Configuration files are loaded from (in priority order):
1. PERSONA_BIAS_* environment variables
2. --config <path>     Explicit config file
3. ./persona-bias.toml Project-level config
4. ~/.config/persona-bias/config.toml   Global config

Example:
  persona-bias final_dataset.json
  persona-bias --limit 1 -v final_dataset.json
  persona-bias --base-url http://localhost:8000/v1 --concurrency 4 data.json
"#)]
pub struct Cli {
    /// Scenario dataset (JSON array); falls back to `experiment.dataset`
    pub dataset: Option<PathBuf>,

    /// Model used by both agents
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Maximum number of scenarios running at once
    #[arg(short = 'j', long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Run only the first N scenarios
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// JSONL audit log to append scenario records to
    #[arg(long, value_name = "PATH")]
    pub audit_log: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
