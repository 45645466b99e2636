//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmap-grade - Grade learner concept maps against a reference map.
#[derive(Debug, Parser)]
#[command(name = "cmap-grade")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CMAP_GRADE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one score line per algorithm)
    Quiet,
}

/// Expansion mode argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Keep every proposition as one link
    None,
    /// Main link plus qualifier links
    Qualifier,
    /// Synthetic junction nodes
    Junction,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Grade a learner map against a reference map
    Grade(GradeArgs),

    /// List available scoring algorithms
    Algorithms,

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the grade command.
#[derive(Debug, Parser)]
pub struct GradeArgs {
    /// Reference (expert) map, `.json` or `.toml`
    #[arg(short, long)]
    pub master: PathBuf,

    /// Learner map, `.json` or `.toml`
    #[arg(short, long)]
    pub student: PathBuf,

    /// Algorithm to run (repeatable, default: all)
    #[arg(short, long = "algorithm")]
    pub algorithms: Vec<String>,

    /// How multi-node propositions are expanded
    #[arg(short = 'e', long, value_enum)]
    pub expansion_mode: Option<ModeArg>,

    /// Points per learner cross link (0-4)
    #[arg(long)]
    pub conflict_bonus: Option<u8>,

    /// Skip precision, recall and F-value
    #[arg(long)]
    pub simple_score_only: bool,

    /// Per-algorithm time limit in seconds
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,

    /// Include per-link detail in table output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<ModeArg> for cmap_normalizer::ExpansionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => cmap_normalizer::ExpansionMode::None,
            ModeArg::Qualifier => cmap_normalizer::ExpansionMode::Qualifier,
            ModeArg::Junction => cmap_normalizer::ExpansionMode::Junction,
        }
    }
}
