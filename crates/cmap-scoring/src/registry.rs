//! Static algorithm registry
//!
//! The algorithm set is closed, so registration happens at compile time: a
//! table mapping names to metadata and a grading function.

use crate::algorithms::{lea, mcclure, novak};
use crate::{ScoringError, ScoringOptions, ScoringResult};
use cmap_domain::RawProposition;
use tracing::info;

/// Signature shared by every grading function
pub type GradeFn = fn(
    &[RawProposition],
    &[RawProposition],
    &ScoringOptions,
) -> Result<ScoringResult, ScoringError>;

/// Registered algorithm
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmInfo {
    /// Lookup name
    pub name: &'static str,

    /// Human-readable name
    pub display_name: &'static str,

    /// One-line description
    pub description: &'static str,

    /// Options from [`ScoringOptions`] the algorithm reads
    pub supported_options: &'static [&'static str],

    /// Grading function
    pub grade: GradeFn,
}

/// Every available algorithm, in display order
pub static ALGORITHMS: &[AlgorithmInfo] = &[
    AlgorithmInfo {
        name: mcclure::NAME,
        display_name: "McClure",
        description: "Per-proposition partial credit: 3 exact, 2 reversed, 1 wrong label",
        supported_options: &["expansion_mode", "simple_score_only"],
        grade: mcclure::grade,
    },
    AlgorithmInfo {
        name: novak::NAME,
        display_name: "Novak",
        description: "Exact matches only, with limitation and cross-link bonuses",
        supported_options: &["expansion_mode", "conflict_bonus", "simple_score_only"],
        grade: novak::grade,
    },
    AlgorithmInfo {
        name: lea::NAME,
        display_name: "LEA",
        description: "Set-overlap link scoring (0-4) with exhaustive optimal matching",
        supported_options: &["expansion_mode", "simple_score_only", "matcher"],
        grade: lea::grade,
    },
];

/// Look up an algorithm by name, ignoring case and surrounding whitespace
pub fn find_algorithm(name: &str) -> Option<&'static AlgorithmInfo> {
    let name = name.trim();
    ALGORITHMS
        .iter()
        .find(|info| info.name.eq_ignore_ascii_case(name))
}

/// Names of all registered algorithms
pub fn algorithm_names() -> Vec<&'static str> {
    ALGORITHMS.iter().map(|info| info.name).collect()
}

/// Grade a learner map against a reference map with the named algorithm
///
/// # Examples
///
/// ```
/// use cmap_domain::RawProposition;
/// use cmap_scoring::{score, ScoringOptions};
///
/// let master = vec![RawProposition::new("m1", "A", "B", "causes")];
/// let student = vec![RawProposition::new("s1", "A", "B", "causes")];
///
/// let result = score("mcclure", &master, &student, &ScoringOptions::default()).unwrap();
/// assert_eq!(result.total_score, 3);
/// assert_eq!(result.percentage, 100.0);
/// ```
pub fn score(
    algorithm: &str,
    master: &[RawProposition],
    student: &[RawProposition],
    options: &ScoringOptions,
) -> Result<ScoringResult, ScoringError> {
    options.validate()?;
    let info = find_algorithm(algorithm)
        .ok_or_else(|| ScoringError::UnknownAlgorithm(algorithm.to_string()))?;

    info!(
        "Grading with {} ({} reference rows, {} learner rows, mode: {})",
        info.display_name,
        master.len(),
        student.len(),
        options.expansion_mode
    );

    let result = (info.grade)(master, student, options)?;
    info!("{}", result.summary());
    Ok(result)
}
