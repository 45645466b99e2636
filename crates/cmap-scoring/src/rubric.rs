//! Link scoring rubrics
//!
//! Two independent schemes:
//! - Rubric A (per proposition, 0-3): [`McClureRubric`] with partial-credit
//!   tiers and [`NovakRubric`] with exact matches only
//! - Rubric B (set overlap, 0-4): [`SetOverlapRubric`], used by the optimal matcher

use cmap_domain::{
    nodes_match, CausalLink, ExpandedLink, LinkComparator, MatchKind, PropositionRubric,
    RubricOutcome,
};
use std::collections::BTreeSet;

/// McClure rubric: 3 exact, 2 reversed direction, 1 wrong label, 0 otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct McClureRubric;

impl McClureRubric {
    /// Same nodes, direction and label
    pub const PERFECT_MATCH: u8 = 3;
    /// Same nodes and label, reversed direction
    pub const DIRECTION_MISMATCH: u8 = 2;
    /// Same nodes and direction, different label
    pub const LABEL_MISMATCH: u8 = 1;
}

impl PropositionRubric for McClureRubric {
    fn perfect_score(&self) -> u8 {
        Self::PERFECT_MATCH
    }

    fn score_link(&self, learner: &ExpandedLink, reference: &[ExpandedLink]) -> RubricOutcome {
        if let Some(index) = find_exact(learner, reference) {
            return outcome(Self::PERFECT_MATCH, MatchKind::Perfect, index);
        }

        let reversed = reference.iter().position(|r| {
            r.label == learner.label
                && nodes_match(
                    &learner.antecedent,
                    &learner.consequent,
                    &r.consequent,
                    &r.antecedent,
                )
        });
        if let Some(index) = reversed {
            return outcome(Self::DIRECTION_MISMATCH, MatchKind::DirectionMismatch, index);
        }

        let same_nodes = reference.iter().position(|r| {
            nodes_match(
                &learner.antecedent,
                &learner.consequent,
                &r.antecedent,
                &r.consequent,
            )
        });
        if let Some(index) = same_nodes {
            return outcome(Self::LABEL_MISMATCH, MatchKind::LabelMismatch, index);
        }

        RubricOutcome::no_match()
    }
}

/// Novak rubric: 3 for an exact match, 0 otherwise
///
/// Cross links (`conflict` label) match like any other label; their bonus
/// is tallied separately with [`count_conflicts`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NovakRubric;

impl NovakRubric {
    /// Same nodes, direction and label
    pub const PERFECT_MATCH: u8 = 3;
    /// Points per limitation structure in the learner's raw map
    pub const LIMITATION_BONUS: u32 = 4;
}

impl PropositionRubric for NovakRubric {
    fn perfect_score(&self) -> u8 {
        Self::PERFECT_MATCH
    }

    fn score_link(&self, learner: &ExpandedLink, reference: &[ExpandedLink]) -> RubricOutcome {
        match find_exact(learner, reference) {
            Some(index) => outcome(Self::PERFECT_MATCH, MatchKind::Perfect, index),
            None => RubricOutcome::no_match(),
        }
    }
}

/// Number of links carrying the cross-link label
pub fn count_conflicts(links: &[ExpandedLink]) -> usize {
    links.iter().filter(|link| link.label.is_conflict()).count()
}

fn find_exact(learner: &ExpandedLink, reference: &[ExpandedLink]) -> Option<usize> {
    reference.iter().position(|r| {
        r.label == learner.label
            && nodes_match(
                &learner.antecedent,
                &learner.consequent,
                &r.antecedent,
                &r.consequent,
            )
    })
}

fn outcome(score: u8, kind: MatchKind, index: usize) -> RubricOutcome {
    RubricOutcome {
        score,
        kind,
        reference_index: Some(index),
    }
}

/// Set-overlap rubric for causal links
///
/// | Score | Condition |
/// |-------|-----------|
/// | 4 | both sides equal, same label |
/// | 3 | both sides equal with another label, or sides swapped |
/// | 2 | both sides overlap, same label |
/// | 1 | both sides overlap with another label, or overlap when swapped |
/// | 0 | otherwise |
///
/// # Examples
///
/// ```
/// use cmap_domain::{CausalLink, LinkComparator};
/// use cmap_scoring::SetOverlapRubric;
///
/// let reference = CausalLink::new(["A", "B"], ["C"], "causes");
/// let learner = CausalLink::new(["A"], ["C"], "causes");
/// assert_eq!(SetOverlapRubric.compare(&reference, &learner), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SetOverlapRubric;

impl SetOverlapRubric {
    /// Highest score for a single pair
    pub const MAX_SCORE: u8 = 4;
}

impl LinkComparator for SetOverlapRubric {
    fn compare(&self, reference: &CausalLink, learner: &CausalLink) -> u8 {
        let same_label = reference.label == learner.label;

        if reference.antecedents == learner.antecedents
            && reference.consequents == learner.consequents
        {
            return if same_label { 4 } else { 3 };
        }

        if reference.antecedents == learner.consequents
            && reference.consequents == learner.antecedents
        {
            return 3;
        }

        if overlaps(&reference.antecedents, &learner.antecedents)
            && overlaps(&reference.consequents, &learner.consequents)
        {
            return if same_label { 2 } else { 1 };
        }

        if overlaps(&reference.antecedents, &learner.consequents)
            && overlaps(&reference.consequents, &learner.antecedents)
        {
            return 1;
        }

        0
    }

    fn max_score(&self) -> u8 {
        Self::MAX_SCORE
    }
}

fn overlaps(a: &BTreeSet<String>, b: &BTreeSet<String>) -> bool {
    !a.is_disjoint(b)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn causal_link() -> impl Strategy<Value = CausalLink> {
        (
            prop::collection::btree_set("[a-e]", 1..4),
            prop::collection::btree_set("[a-e]", 1..4),
            "[xyz]",
        )
            .prop_map(|(antecedents, consequents, label)| {
                CausalLink::new(antecedents, consequents, label.as_str())
            })
    }

    proptest! {
        /// Property: a well-formed link always scores the maximum against itself
        #[test]
        fn test_compare_self_is_max(link in causal_link()) {
            prop_assert_eq!(SetOverlapRubric.compare(&link, &link), 4);
        }

        /// Property: scores stay within 0-4
        #[test]
        fn test_compare_in_range(a in causal_link(), b in causal_link()) {
            prop_assert!(SetOverlapRubric.compare(&a, &b) <= SetOverlapRubric::MAX_SCORE);
        }
    }
}
