//! Novak scoring
//!
//! Exact matches only (3 or 0), plus two bonuses:
//! - a limitation bonus of 4 points per many-to-one or one-to-many learner
//!   proposition, counted on the raw rows
//! - an optional cross-link bonus per learner link labelled `conflict`
//!
//! The cross-link bonus is added to the total and to the precision side of
//! the metrics but left out of the maximum and the percentage.

use super::{collect_diagnostics, percentage, tally_links};
use crate::{
    count_conflicts, proposition_metrics, Bonuses, NovakRubric, ScoringDetail, ScoringError,
    ScoringOptions, ScoringResult,
};
use cmap_domain::{PropositionRubric, RawProposition};
use cmap_normalizer::Normalizer;
use tracing::debug;

/// Registry name
pub const NAME: &str = "novak";

/// Grade a learner map with the Novak rubric
pub fn grade(
    master: &[RawProposition],
    student: &[RawProposition],
    options: &ScoringOptions,
) -> Result<ScoringResult, ScoringError> {
    let normalizer = Normalizer::new(options.normalizer_config());
    let master_map = normalizer.normalize(master);
    let student_map = normalizer.normalize(student);

    let rubric = NovakRubric;
    let perfect = rubric.perfect_score();
    let tally = tally_links(&rubric, &student_map.links, &master_map.links);

    let limitation_count = student_map.limitation_count;
    let limitation_score = limitation_count as u32 * NovakRubric::LIMITATION_BONUS;
    let conflict_count = count_conflicts(&student_map.links);
    let cross_link_point_per_item = options.conflict_bonus_per_item();
    let cross_link_score = conflict_count as u32 * u32::from(cross_link_point_per_item);

    let student_links = student_map.links.len();
    let master_links = master_map.links.len();
    let scored = tally.proposition_score + limitation_score;
    let max_score = student_links as u32 * u32::from(perfect) + limitation_score;

    let metrics = (!options.simple_score_only).then(|| {
        proposition_metrics(
            tally.proposition_score,
            perfect,
            student_links,
            master_links,
            limitation_score,
            cross_link_score,
        )
    });

    debug!(
        "Novak: {} exact links, {} limitations, {} cross links",
        tally.matched_count, limitation_count, conflict_count
    );

    Ok(ScoringResult {
        method: NAME,
        total_score: scored + cross_link_score,
        max_score,
        percentage: percentage(scored, max_score),
        metrics,
        score_counts: tally.score_counts,
        bonuses: Bonuses {
            limitation_count,
            limitation_score,
            conflict_count,
            cross_link_point_per_item,
            cross_link_score,
        },
        diagnostics: collect_diagnostics(&master_map.diagnostics, &student_map.diagnostics),
        detail: ScoringDetail::Proposition {
            links: tally.links,
            matched_count: tally.matched_count,
            master_links,
            student_links,
            proposition_score: tally.proposition_score,
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
    fn test_exact_only() {
        let master = vec![prop("m1", "A", "B", "causes")];
        let student = vec![prop("s1", "A", "B", "causes"), prop("s2", "B", "A", "causes")];

        let result = grade(&master, &student, &ScoringOptions::default()).unwrap();
        assert_eq!(result.total_score, 3);
        assert_eq!(result.max_score, 6);
        assert_eq!(result.score_counts.get(&0), Some(&1));
        assert_eq!(result.bonuses, Bonuses::default());
    }

    #[test]
    fn test_limitation_bonus() {
        let master = vec![prop("m1", "1 2", "3", "causes")];
        let student = vec![prop("s1", "1 2", "3", "causes")];

        let result = grade(&master, &student, &ScoringOptions::default()).unwrap();
        // 3 links x 3 points plus one limitation worth 4
        assert_eq!(result.bonuses.limitation_count, 1);
        assert_eq!(result.bonuses.limitation_score, 4);
        assert_eq!(result.total_score, 13);
        assert_eq!(result.max_score, 13);
        assert_eq!(result.percentage, 100.0);

        let metrics = result.metrics.unwrap();
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 1.0);
    }

    #[test]
    fn test_cross_link_bonus_outside_percentage() {
        let master = vec![prop("m1", "A", "B", "conflict")];
        let student = vec![prop("s1", "A", "B", "Conflict"), prop("s2", "C", "D", "conflict")];
        let options = ScoringOptions {
            conflict_bonus: 7,
            ..ScoringOptions::default()
        };

        let result = grade(&master, &student, &options).unwrap();
        assert_eq!(result.bonuses.conflict_count, 2);
        assert_eq!(result.bonuses.cross_link_point_per_item, 4);
        assert_eq!(result.bonuses.cross_link_score, 8);
        assert_eq!(result.total_score, 3 + 8);
        assert_eq!(result.max_score, 6);
        assert_eq!(result.percentage, 50.0);

        let metrics = result.metrics.unwrap();
        // (3 + 8) / (6 + 8) and 3 / 3
        assert!((metrics.precision - 11.0 / 14.0).abs() < 1e-9);
        assert_eq!(metrics.recall, 1.0);
    }
}
