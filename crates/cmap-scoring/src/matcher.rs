//! Optimal matching between reference and learner links
//!
//! Exhaustive search: every size-`k` combination of indices from the larger
//! list, every permutation of that combination, paired against the full index
//! range of the smaller list (`k = min(n, m)`). Combinations and permutations
//! are both visited in ascending lexicographic order and only a strictly
//! higher total replaces the current best, so ties keep the first maximum.

use crate::{MatchError, MatcherConfig};
use cmap_domain::{CausalLink, LinkComparator, MatchAssignment};
use tracing::{debug, warn};

/// Number of candidate assignments the search evaluates, `P(N, k)`
///
/// Saturates at `u64::MAX`.
pub fn candidate_count(reference: usize, learner: usize) -> u64 {
    let pool = reference.max(learner) as u64;
    let k = reference.min(learner) as u64;
    (pool - k + 1..=pool).fold(1u64, |acc, factor| acc.saturating_mul(factor))
}

/// Summed comparator score of an assignment
///
/// Fails fast on any index outside its list.
pub fn score_assignment<C>(
    comparator: &C,
    reference: &[CausalLink],
    learner: &[CausalLink],
    pairs: &[(usize, usize)],
) -> Result<u32, MatchError>
where
    C: LinkComparator + ?Sized,
{
    pairs.iter().try_fold(0u32, |total, &(r, l)| {
        let reference_link = lookup(reference, r, "reference")?;
        let learner_link = lookup(learner, l, "learner")?;
        Ok(total + u32::from(comparator.compare(reference_link, learner_link)))
    })
}

fn lookup<'a>(
    links: &'a [CausalLink],
    index: usize,
    side: &'static str,
) -> Result<&'a CausalLink, MatchError> {
    links.get(index).ok_or(MatchError::InvalidIndex {
        side,
        index,
        len: links.len(),
    })
}

/// Pair scores computed once per search
struct ScoreTable {
    scores: Vec<u8>,
    learner_len: usize,
    reference_len: usize,
}

impl ScoreTable {
    fn build<C>(comparator: &C, reference: &[CausalLink], learner: &[CausalLink]) -> Self
    where
        C: LinkComparator + ?Sized,
    {
        let scores = reference
            .iter()
            .flat_map(|r| learner.iter().map(move |l| comparator.compare(r, l)))
            .collect();
        Self {
            scores,
            learner_len: learner.len(),
            reference_len: reference.len(),
        }
    }

    fn total(&self, pairs: &[(usize, usize)]) -> Result<u32, MatchError> {
        pairs.iter().try_fold(0u32, |total, &(r, l)| {
            if r >= self.reference_len {
                return Err(MatchError::InvalidIndex {
                    side: "reference",
                    index: r,
                    len: self.reference_len,
                });
            }
            if l >= self.learner_len {
                return Err(MatchError::InvalidIndex {
                    side: "learner",
                    index: l,
                    len: self.learner_len,
                });
            }
            Ok(total + u32::from(self.scores[r * self.learner_len + l]))
        })
    }
}

/// Exhaustive optimal matcher
#[derive(Debug, Clone, Default)]
pub struct OptimalMatcher {
    config: MatcherConfig,
}

impl OptimalMatcher {
    /// Create a new matcher with the given limits
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    /// Active limits
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Find the assignment maximizing the summed comparator score
    ///
    /// An empty list on either side yields the empty assignment. So does an
    /// input where every pair scores 0.
    pub fn solve<C>(
        &self,
        comparator: &C,
        reference: &[CausalLink],
        learner: &[CausalLink],
    ) -> Result<MatchAssignment, MatchError>
    where
        C: LinkComparator + ?Sized,
    {
        let (n, m) = (reference.len(), learner.len());
        if n == 0 || m == 0 {
            debug!("Matching skipped: {} reference links, {} learner links", n, m);
            return Ok(MatchAssignment::empty());
        }

        let candidates = candidate_count(n, m);
        if candidates > self.config.max_candidates {
            return Err(MatchError::SearchTooLarge {
                reference: n,
                learner: m,
                candidates,
                limit: self.config.max_candidates,
            });
        }
        if candidates > self.config.warn_candidates {
            warn!(
                "Large matching search: {} candidate assignments ({} reference x {} learner links)",
                candidates, n, m
            );
        }

        let table = ScoreTable::build(comparator, reference, learner);
        let reference_fixed = n <= m;
        let (pool, k) = if reference_fixed { (m, n) } else { (n, m) };

        let mut best = MatchAssignment::empty();
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(k);
        let mut combination: Vec<usize> = (0..k).collect();
        let mut evaluated = 0u64;

        loop {
            let mut permutation = combination.clone();
            loop {
                pairs.clear();
                pairs.extend(permutation.iter().enumerate().map(|(fixed, &chosen)| {
                    if reference_fixed {
                        (fixed, chosen)
                    } else {
                        (chosen, fixed)
                    }
                }));

                let total = table.total(&pairs)?;
                evaluated += 1;
                if total > best.total_score {
                    best = MatchAssignment::new(pairs.clone(), total);
                }

                if !next_permutation(&mut permutation) {
                    break;
                }
            }

            if !next_combination(&mut combination, pool) {
                break;
            }
        }

        debug!(
            "Matching evaluated {} candidates: best score {} over {} pairs",
            evaluated,
            best.total_score,
            best.len()
        );
        Ok(best)
    }
}

/// Advance to the next `k`-combination of `0..pool` in lexicographic order
fn next_combination(indices: &mut [usize], pool: usize) -> bool {
    let k = indices.len();
    for i in (0..k).rev() {
        if indices[i] < pool - k + i {
            indices[i] += 1;
            for j in i + 1..k {
                indices[j] = indices[j - 1] + 1;
            }
            return true;
        }
    }
    false
}

/// Advance to the next lexicographic permutation of distinct values
fn next_permutation(values: &mut [usize]) -> bool {
    let len = values.len();
    if len < 2 {
        return false;
    }

    let mut i = len - 1;
    while i > 0 && values[i - 1] >= values[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = len - 1;
    while values[j] <= values[i - 1] {
        j -= 1;
    }
    values.swap(i - 1, j);
    values[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SetOverlapRubric;

    fn link(ante: &str, conq: &str, label: &str) -> CausalLink {
        CausalLink::new(ante.split_whitespace(), conq.split_whitespace(), label)
    }

    fn solve(reference: &[CausalLink], learner: &[CausalLink]) -> MatchAssignment {
        OptimalMatcher::default()
            .solve(&SetOverlapRubric, reference, learner)
            .unwrap()
    }

    #[test]
    fn test_candidate_count() {
        assert_eq!(candidate_count(3, 3), 6);
        assert_eq!(candidate_count(5, 2), 20);
        assert_eq!(candidate_count(2, 5), 20);
        assert_eq!(candidate_count(10, 10), 3_628_800);
        assert_eq!(candidate_count(0, 4), 1);
        assert_eq!(candidate_count(40, 40), u64::MAX);
    }

    #[test]
    fn test_combination_order() {
        let mut combo = vec![0, 1];
        let mut seen = vec![combo.clone()];
        while next_combination(&mut combo, 4) {
            seen.push(combo.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
    }

    #[test]
    fn test_permutation_order() {
        let mut perm = vec![1, 3, 4];
        let mut seen = vec![perm.clone()];
        while next_permutation(&mut perm) {
            seen.push(perm.clone());
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[1], vec![1, 4, 3]);
        assert_eq!(seen[5], vec![4, 3, 1]);
    }

    #[test]
    fn test_picks_exact_label() {
        let reference = vec![link("A", "B", "causes")];
        let learner = vec![link("A", "B", "wrong"), link("A", "B", "causes")];

        let best = solve(&reference, &learner);
        assert_eq!(best.total_score, 4);
        assert_eq!(best.pairs, vec![(0, 1)]);
    }

    #[test]
    fn test_global_optimum_beats_greedy() {
        // Taking the best learner link for each reference in order scores
        // 2 + 0; pairing crosswise scores 1 + 4
        let reference = vec![link("A C", "B D", "x"), link("A", "B", "x")];
        let learner = vec![link("A", "B", "x"), link("C", "D", "y")];

        let greedy = score_assignment(&SetOverlapRubric, &reference, &learner, &[(0, 0), (1, 1)])
            .unwrap();
        assert_eq!(greedy, 2);

        let best = solve(&reference, &learner);
        assert_eq!(best.total_score, 5);
        assert_eq!(best.pairs, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_more_reference_links() {
        let reference = vec![
            link("X", "Y", "x"),
            link("A", "B", "causes"),
            link("C", "D", "causes"),
        ];
        let learner = vec![link("C", "D", "causes"), link("A", "B", "causes")];

        let best = solve(&reference, &learner);
        assert_eq!(best.total_score, 8);
        assert_eq!(best.pairs, vec![(2, 0), (1, 1)]);
        assert_eq!(
            best.used_reference_indices().into_iter().collect::<Vec<_>>(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_empty_lists() {
        let links = vec![link("A", "B", "x")];
        assert_eq!(solve(&[], &links), MatchAssignment::empty());
        assert_eq!(solve(&links, &[]), MatchAssignment::empty());
    }

    #[test]
    fn test_all_zero_yields_empty_assignment() {
        let best = solve(&[link("A", "B", "x")], &[link("C", "D", "x")]);
        assert!(best.is_empty());
        assert_eq!(best.total_score, 0);
    }

    #[test]
    fn test_search_ceiling() {
        let links: Vec<_> = (0..9).map(|i| link(&i.to_string(), "Z", "x")).collect();
        let err = OptimalMatcher::new(MatcherConfig::strict())
            .solve(&SetOverlapRubric, &links, &links)
            .unwrap_err();
        assert_eq!(
            err,
            MatchError::SearchTooLarge {
                reference: 9,
                learner: 9,
                candidates: 362_880,
                limit: 40_320,
            }
        );
    }

    #[test]
    fn test_invalid_index_fails_fast() {
        let links = vec![link("A", "B", "x")];
        let err = score_assignment(&SetOverlapRubric, &links, &links, &[(0, 3)]).unwrap_err();
        assert_eq!(
            err,
            MatchError::InvalidIndex {
                side: "learner",
                index: 3,
                len: 1,
            }
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::SetOverlapRubric;
    use proptest::prelude::*;

    fn causal_link() -> impl Strategy<Value = CausalLink> {
        (
            prop::collection::btree_set("[a-d]", 1..3),
            prop::collection::btree_set("[a-d]", 1..3),
            "[xy]",
        )
            .prop_map(|(a, c, l)| CausalLink::new(a, c, l.as_str()))
    }

    /// Best total over every injective map from the smaller list into the larger
    fn brute_force(reference: &[CausalLink], learner: &[CausalLink]) -> u32 {
        fn go(
            small: usize,
            large: usize,
            i: usize,
            used: &mut [bool],
            score: &dyn Fn(usize, usize) -> u32,
        ) -> u32 {
            if i == small {
                return 0;
            }
            let mut best = 0;
            for j in 0..large {
                if !used[j] {
                    used[j] = true;
                    best = best.max(score(i, j) + go(small, large, i + 1, used, score));
                    used[j] = false;
                }
            }
            best
        }

        let pair = |r: usize, l: usize| {
            u32::from(SetOverlapRubric.compare(&reference[r], &learner[l]))
        };
        let (n, m) = (reference.len(), learner.len());
        if n <= m {
            go(n, m, 0, &mut vec![false; m], &pair)
        } else {
            go(m, n, 0, &mut vec![false; n], &|l, r| pair(r, l))
        }
    }

    proptest! {
        /// Property: the solver finds the brute-force optimum
        #[test]
        fn test_matches_brute_force(
            reference in prop::collection::vec(causal_link(), 0..5),
            learner in prop::collection::vec(causal_link(), 0..5),
        ) {
            let best = OptimalMatcher::default()
                .solve(&SetOverlapRubric, &reference, &learner)
                .unwrap();
            prop_assert_eq!(best.total_score, brute_force(&reference, &learner));

            let rescored = score_assignment(&SetOverlapRubric, &reference, &learner, &best.pairs)
                .unwrap();
            prop_assert_eq!(rescored, best.total_score);
        }

        /// Property: the optimum is never below any single pair
        #[test]
        fn test_never_below_single_pair(
            reference in prop::collection::vec(causal_link(), 1..4),
            learner in prop::collection::vec(causal_link(), 1..4),
        ) {
            let best = OptimalMatcher::default()
                .solve(&SetOverlapRubric, &reference, &learner)
                .unwrap();
            for r in &reference {
                for l in &learner {
                    prop_assert!(best.total_score >= u32::from(SetOverlapRubric.compare(r, l)));
                }
            }
        }
    }
}
