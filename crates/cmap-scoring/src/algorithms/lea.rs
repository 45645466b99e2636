//! LEA scoring (link evaluation with optimal matching)
//!
//! One set-based link per raw proposition, no junction expansion. Reference
//! and learner links are paired by the exhaustive optimal matcher under the
//! 0-4 set-overlap rubric.

use super::{collect_diagnostics, percentage};
use crate::metrics::ratio;
use crate::{
    calculate_f_value, Bonuses, OptimalMatcher, ScoringDetail, ScoringError, ScoringOptions,
    ScoringResult, SetOverlapRubric,
};
use cmap_domain::{CausalLink, LinkComparator, RawProposition};
use cmap_normalizer::{decompose_qualifiers, Diagnostic, ExpansionMode};
use std::collections::BTreeMap;
use tracing::debug;

/// Registry name
pub const NAME: &str = "lea";

/// Causal links built from one map
#[derive(Debug, Clone, Default)]
pub struct CausalMap {
    /// Well-formed links in input order
    pub links: Vec<CausalLink>,

    /// Rows skipped during qualifier decomposition
    pub diagnostics: Vec<Diagnostic>,
}

/// Build causal links from raw rows
///
/// In qualifier mode many-to-one rows are decomposed first and many-to-many
/// rows are skipped with a diagnostic. Rows without nodes on both sides are
/// dropped.
pub fn causal_links(propositions: &[RawProposition], mode: ExpansionMode) -> CausalMap {
    let build = |rows: &[RawProposition]| -> Vec<CausalLink> {
        rows.iter()
            .map(CausalLink::from_raw)
            .filter(CausalLink::is_well_formed)
            .collect()
    };

    match mode {
        ExpansionMode::Qualifier => {
            let decomposed = decompose_qualifiers(propositions);
            CausalMap {
                links: build(&decomposed.rows),
                diagnostics: decomposed.diagnostics,
            }
        }
        ExpansionMode::None | ExpansionMode::Junction => CausalMap {
            links: build(propositions),
            diagnostics: Vec::new(),
        },
    }
}

/// Grade a learner map with set-overlap scoring and optimal matching
pub fn grade(
    master: &[RawProposition],
    student: &[RawProposition],
    options: &ScoringOptions,
) -> Result<ScoringResult, ScoringError> {
    let master_map = causal_links(master, options.expansion_mode);
    let student_map = causal_links(student, options.expansion_mode);
    let (answers, students) = (&master_map.links, &student_map.links);
    let (n, m) = (answers.len(), students.len());

    let rubric = SetOverlapRubric;
    let assignment =
        OptimalMatcher::new(options.matcher.clone()).solve(&rubric, answers, students)?;
    let raw_score = assignment.total_score;
    let used_answers = assignment.used_reference_indices().len();
    let used_students = assignment.used_learner_indices().len();

    let mut score_counts = BTreeMap::new();
    for &(r, l) in &assignment.pairs {
        *score_counts
            .entry(rubric.compare(&answers[r], &students[l]))
            .or_insert(0) += 1;
    }

    let full = calculate_f_value(raw_score, n, m, used_answers, used_students);

    let (max_score, metrics, score_rate) = if options.simple_score_only {
        let max = n.min(m) as u32 * u32::from(rubric.max_score());
        (max, None, ratio(f64::from(raw_score), f64::from(max)))
    } else {
        (full.max_possible_score, Some(full.metrics()), full.score_rate)
    };

    debug!(
        "LEA: {} reference and {} learner links, {} pairs, raw score {}",
        n,
        m,
        assignment.len(),
        raw_score
    );

    Ok(ScoringResult {
        method: NAME,
        total_score: raw_score,
        max_score,
        percentage: percentage(raw_score, max_score),
        metrics,
        score_counts,
        bonuses: Bonuses::default(),
        diagnostics: collect_diagnostics(&master_map.diagnostics, &student_map.diagnostics),
        detail: ScoringDetail::Causal {
            matched_pairs: assignment.len(),
            assignment: assignment.pairs,
            unmatched_answers: full.unmatched_answers,
            unmatched_students: full.unmatched_students,
            coverage_rate: full.coverage_rate,
            score_rate,
            answer_count: n,
            student_count: m,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(id: &str, antes: &str, conq: &str, label: &str) -> RawProposition {
        RawProposition::new(id, antes, conq, label)
    }

    #[test]
    fn test_causal_links_keep_sets() {
        let links = causal_links(
            &[prop("1", "B A", "C", "causes"), prop("2", "", "C", "causes")],
            ExpansionMode::Junction,
        );
        assert_eq!(links.links.len(), 1);
        assert_eq!(links.links[0].antecedents.len(), 2);
    }

    #[test]
    fn test_causal_links_qualifier_mode() {
        let map = causal_links(&[prop("1", "B A", "C", "causes")], ExpansionMode::Qualifier);
        assert_eq!(map.links.len(), 2);
        assert_eq!(map.links[0], CausalLink::new(["A"], ["C"], "causes"));
        assert_eq!(map.links[1], CausalLink::new(["A"], ["B"], "Qualifier"));
    }

    #[test]
    fn test_qualifier_mode_ignores_antecedent_order() {
        let master = vec![prop("m1", "B A", "C", "causes")];
        let student = vec![prop("s1", "A B", "C", "causes")];
        let options = ScoringOptions::with_mode(ExpansionMode::Qualifier);

        let result = grade(&master, &student, &options).unwrap();
        assert_eq!(result.total_score, 8);
        assert_eq!(result.score_counts.get(&4), Some(&2));
    }

    #[test]
    fn test_qualifier_mode_skips_many_to_many() {
        let master = vec![prop("m1", "A", "C", "causes")];
        let student = vec![prop("s1", "A B", "C D", "causes"), prop("s2", "A", "C", "causes")];
        let options = ScoringOptions::with_mode(ExpansionMode::Qualifier);

        let result = grade(&master, &student, &options).unwrap();
        assert_eq!(result.total_score, 4);
        assert_eq!(result.diagnostics.len(), 1);
        assert!(result.diagnostics[0].starts_with("student:"));
        match result.detail {
            ScoringDetail::Causal { student_count, .. } => assert_eq!(student_count, 1),
            other => panic!("unexpected detail: {:?}", other),
        }
    }

    #[test]
    fn test_full_mode() {
        let master = vec![
            prop("m1", "A", "B", "causes"),
            prop("m2", "B", "C", "causes"),
            prop("m3", "C", "D", "causes"),
        ];
        let student = vec![prop("s1", "B", "C", "causes"), prop("s2", "A", "B", "prevents")];

        let result = grade(&master, &student, &ScoringOptions::default()).unwrap();
        assert_eq!(result.total_score, 7);
        assert_eq!(result.max_score, 12);

        let metrics = result.metrics.unwrap();
        assert!((metrics.recall - 7.0 / 12.0).abs() < 1e-9);
        assert!((metrics.precision - 7.0 / 8.0).abs() < 1e-9);

        match result.detail {
            ScoringDetail::Causal {
                matched_pairs,
                unmatched_answers,
                unmatched_students,
                coverage_rate,
                ..
            } => {
                assert_eq!(matched_pairs, 2);
                assert_eq!(unmatched_answers, 1);
                assert_eq!(unmatched_students, 0);
                assert!((coverage_rate - 2.0 / 3.0).abs() < 1e-9);
            }
            other => panic!("unexpected detail: {:?}", other),
        }
        assert_eq!(result.score_counts.get(&4), Some(&1));
        assert_eq!(result.score_counts.get(&3), Some(&1));
    }

    #[test]
    fn test_simple_mode() {
        let master = vec![
            prop("m1", "A", "B", "causes"),
            prop("m2", "B", "C", "causes"),
            prop("m3", "C", "D", "causes"),
        ];
        let student = vec![prop("s1", "B", "C", "causes")];
        let options = ScoringOptions {
            simple_score_only: true,
            ..ScoringOptions::default()
        };

        let result = grade(&master, &student, &options).unwrap();
        assert_eq!(result.total_score, 4);
        assert_eq!(result.max_score, 4);
        assert_eq!(result.percentage, 100.0);
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_empty_student_is_zero() {
        let master = vec![prop("m1", "A", "B", "causes")];
        let result = grade(&master, &[], &ScoringOptions::default()).unwrap();
        assert_eq!(result.total_score, 0);
        assert_eq!(result.metrics.unwrap().f_value, 0.0);
    }
}
