//! Normalizer error types

use thiserror::Error;

/// Errors that can occur while configuring the normalizer
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NormalizerError {
    /// Unknown expansion mode name
    #[error("Invalid expansion mode: {0} (expected none, qualifier or junction)")]
    InvalidExpansionMode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
