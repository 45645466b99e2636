//! Trait definitions for scoring rubrics
//!
//! These traits define the seams between the domain model and the scoring
//! engine. Concrete rubrics live in the scoring crate.

use crate::{CausalLink, ExpandedLink};

/// Pairwise comparison of a reference link with a learner link
///
/// Implemented by the set-overlap rubric and consumed by the optimal matcher.
pub trait LinkComparator {
    /// Score a single pair; must lie in `0..=self.max_score()`
    fn compare(&self, reference: &CausalLink, learner: &CausalLink) -> u8;

    /// Highest score a single pair can earn
    fn max_score(&self) -> u8;
}

/// Per-proposition scoring of one learner link against a reference list
///
/// Implemented by the McClure and Novak rubrics.
pub trait PropositionRubric {
    /// Score awarded for an exact match
    fn perfect_score(&self) -> u8;

    /// Score one learner link by scanning the reference list in order
    fn score_link(&self, learner: &ExpandedLink, reference: &[ExpandedLink]) -> RubricOutcome;
}

/// How a learner link corresponded to the reference map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    /// Same nodes, same direction, same label
    Perfect,

    /// Same nodes and label, reversed direction
    DirectionMismatch,

    /// Same nodes and direction, different label
    LabelMismatch,

    /// No reference link corresponds
    NoMatch,
}

impl MatchKind {
    /// Get the match kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Perfect => "perfect",
            MatchKind::DirectionMismatch => "direction-mismatch",
            MatchKind::LabelMismatch => "label-mismatch",
            MatchKind::NoMatch => "no-match",
        }
    }
}

/// Result of scoring one learner link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubricOutcome {
    /// Score awarded
    pub score: u8,

    /// Which rule fired
    pub kind: MatchKind,

    /// Index of the first reference link satisfying the rule
    pub reference_index: Option<usize>,
}

impl RubricOutcome {
    /// Outcome for a learner link with no counterpart
    pub fn no_match() -> Self {
        Self {
            score: 0,
            kind: MatchKind::NoMatch,
            reference_index: None,
        }
    }
}
