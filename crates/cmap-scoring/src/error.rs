//! Error types for scoring operations

use cmap_normalizer::NormalizerError;
use thiserror::Error;

/// Errors raised by the optimal matcher
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// An assignment referenced a link outside its list
    #[error("Invalid {side} index {index} (list has {len} links)")]
    InvalidIndex {
        /// Which list the index points into (`reference` or `learner`)
        side: &'static str,
        /// Offending index
        index: usize,
        /// Length of that list
        len: usize,
    },

    /// The exhaustive search exceeds the configured ceiling
    #[error(
        "Matching search too large: {candidates} candidate assignments for {reference} reference \
         and {learner} learner links (limit {limit})"
    )]
    SearchTooLarge {
        /// Reference link count
        reference: usize,
        /// Learner link count
        learner: usize,
        /// Candidate assignments the search would evaluate
        candidates: u64,
        /// Configured ceiling
        limit: u64,
    },
}

/// Errors that can occur while grading a concept map
#[derive(Error, Debug)]
pub enum ScoringError {
    /// Optimal matching failed
    #[error("Matching error: {0}")]
    Match(#[from] MatchError),

    /// No algorithm registered under this name
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Normalizer rejected its configuration
    #[error("Normalizer error: {0}")]
    Normalizer(#[from] NormalizerError),
}
