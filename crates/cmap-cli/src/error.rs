//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scoring error
    #[error("Scoring error: {0}")]
    Scoring(#[from] cmap_scoring::ScoringError),

    /// An algorithm ran past its time budget
    #[error("Algorithm '{algorithm}' timed out after {secs}s")]
    Timeout {
        /// Algorithm name
        algorithm: String,
        /// Budget in seconds
        secs: u64,
    },

    /// A grading task panicked or was cancelled
    #[error("Worker error: {0}")]
    Join(#[from] tokio::task::JoinError),
}
