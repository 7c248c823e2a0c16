//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::PipelineVariant;
use std::path::PathBuf;

/// What is printed to stdout once the run finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Run summary followed by the full document
    Full,
    /// Run summary and artifact paths only
    Summary,
    /// Per-agent results as JSON
    Json,
}

/// CLI arguments for the-council
#[derive(Parser, Debug)]
#[command(name = "the-council")]
#[command(author, version, about = "A council of specialist LLM agents drafts a design document")]
#[command(long_about = r#"
The Council runs a roster of specialist LLM agents over an idea. Each agent
builds on a compressed summary of everything the agents before it wrote, and
their contributions are assembled into a structured design document.

The process:
1. Agents run one after another, each through the configured pipeline
2. Contributions are written into the sections each agent owns
3. The last agent writes a meta-analysis and a final review

With --synthesize, an existing document is instead split into chunks that are
synthesized in parallel and merged into one cohesive document.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables (e.g. COUNCIL_PIPELINE__VARIANT=full)
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/the-council/config.toml   Global config

Example:
  the-council "A cozy farming game set on a generation ship"
  the-council --variant full --output full "Roguelike deckbuilder about bees"
  the-council --synthesize design_document.md
"#)]
pub struct Cli {
    /// The idea to develop (not required with --synthesize)
    pub idea: Option<String>,

    /// Synthesize an existing document instead of running the council
    #[arg(long, value_name = "PATH", conflicts_with = "idea")]
    pub synthesize: Option<PathBuf>,

    /// Pipeline variant: minimal, standard or full
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<PipelineVariant>,

    /// Skip the final review pass
    #[arg(long)]
    pub no_final_review: bool,

    /// Skip semantic deduplication
    #[arg(long)]
    pub no_dedup: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Directory artifacts are written to
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Artifact file name without extension
    #[arg(long, value_name = "NAME")]
    pub stem: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write daily-rotated logs to this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

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
