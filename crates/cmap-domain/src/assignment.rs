//! Match assignment module - index pairs chosen by the optimal matcher

use std::collections::BTreeSet;

/// An assignment between reference links and learner links
///
/// Each reference index and each learner index appears at most once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchAssignment {
    /// `(reference_index, learner_index)` pairs in evaluation order
    pub pairs: Vec<(usize, usize)>,

    /// Summed rubric score over all pairs
    pub total_score: u32,
}

impl MatchAssignment {
    /// The empty assignment (score 0)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an assignment from pairs and their total score
    pub fn new(pairs: Vec<(usize, usize)>, total_score: u32) -> Self {
        Self { pairs, total_score }
    }

    /// Number of matched pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pair was chosen
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Reference indices used by this assignment
    pub fn used_reference_indices(&self) -> BTreeSet<usize> {
        self.pairs.iter().map(|&(reference, _)| reference).collect()
    }

    /// Learner indices used by this assignment
    pub fn used_learner_indices(&self) -> BTreeSet<usize> {
        self.pairs.iter().map(|&(_, learner)| learner).collect()
    }
}
