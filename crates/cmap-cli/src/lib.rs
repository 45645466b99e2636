//! cmap-grade CLI library.
//!
//! Command-line front end for the concept map scoring engine: proposition
//! file ingestion, configuration, a concurrent multi-algorithm runner and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod runner;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use runner::{run_algorithms, ExecutionReport};
