//! McClure scoring
//!
//! Per-proposition partial credit: 3 exact, 2 reversed direction, 1 wrong
//! label, 0 otherwise. No bonuses.

use super::{collect_diagnostics, percentage, tally_links};
use crate::{
    proposition_metrics, Bonuses, McClureRubric, ScoringDetail, ScoringError, ScoringOptions,
    ScoringResult,
};
use cmap_domain::{PropositionRubric, RawProposition};
use cmap_normalizer::Normalizer;
use tracing::debug;

/// Registry name
pub const NAME: &str = "mcclure";

/// Grade a learner map with the McClure rubric
pub fn grade(
    master: &[RawProposition],
    student: &[RawProposition],
    options: &ScoringOptions,
) -> Result<ScoringResult, ScoringError> {
    let normalizer = Normalizer::new(options.normalizer_config());
    let master_map = normalizer.normalize(master);
    let student_map = normalizer.normalize(student);

    let rubric = McClureRubric;
    let perfect = rubric.perfect_score();
    let tally = tally_links(&rubric, &student_map.links, &master_map.links);

    let student_links = student_map.links.len();
    let master_links = master_map.links.len();
    let max_score = student_links as u32 * u32::from(perfect);

    let metrics = (!options.simple_score_only).then(|| {
        proposition_metrics(
            tally.proposition_score,
            perfect,
            student_links,
            master_links,
            0,
            0,
        )
    });

    debug!(
        "McClure: {} of {} learner links exact, {} points",
        tally.matched_count, student_links, tally.proposition_score
    );

    Ok(ScoringResult {
        method: NAME,
        total_score: tally.proposition_score,
        max_score,
        percentage: percentage(tally.proposition_score, max_score),
        metrics,
        score_counts: tally.score_counts,
        bonuses: Bonuses::default(),
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
