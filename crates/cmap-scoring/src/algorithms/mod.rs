//! Scoring algorithms
//!
//! Each algorithm grades a learner map against a reference map and returns a
//! [`ScoringResult`](crate::ScoringResult). They are reached through the
//! static table in [`registry`](crate::registry).

pub mod lea;
pub mod mcclure;
pub mod novak;

use crate::LinkScore;
use cmap_domain::{ExpandedLink, PropositionRubric};
use cmap_normalizer::Diagnostic;
use std::collections::BTreeMap;

/// Per-link results of a per-proposition rubric over a whole map
#[derive(Debug, Clone, Default)]
pub(crate) struct PropositionTally {
    pub links: Vec<LinkScore>,
    pub score_counts: BTreeMap<u8, usize>,
    pub proposition_score: u32,
    pub matched_count: usize,
}

/// Score every learner link against the reference list
pub(crate) fn tally_links<R>(
    rubric: &R,
    student: &[ExpandedLink],
    master: &[ExpandedLink],
) -> PropositionTally
where
    R: PropositionRubric + ?Sized,
{
    let perfect = rubric.perfect_score();
    let mut tally = PropositionTally::default();

    for link in student {
        let outcome = rubric.score_link(link, master);

        *tally.score_counts.entry(outcome.score).or_insert(0) += 1;
        tally.proposition_score += u32::from(outcome.score);
        if outcome.score == perfect {
            tally.matched_count += 1;
        }

        tally.links.push(LinkScore {
            link_id: link.id.clone(),
            original_id: link.original_id.clone(),
            antecedent: link.antecedent.id().to_string(),
            consequent: link.consequent.id().to_string(),
            label: link.label.as_str().to_string(),
            score: outcome.score,
            match_kind: outcome.kind.as_str(),
            matched_reference: outcome
                .reference_index
                .and_then(|index| master.get(index))
                .map(|reference| reference.original_id.clone()),
        });
    }

    tally
}

/// Diagnostics of both maps rendered for the result record
pub(crate) fn collect_diagnostics(master: &[Diagnostic], student: &[Diagnostic]) -> Vec<String> {
    master
        .iter()
        .map(|d| format!("master: {}", d))
        .chain(student.iter().map(|d| format!("student: {}", d)))
        .collect()
}

/// `earned / max * 100`, or 0 for an empty maximum
pub(crate) fn percentage(earned: u32, max: u32) -> f64 {
    crate::metrics::ratio(f64::from(earned), f64::from(max)) * 100.0
}
