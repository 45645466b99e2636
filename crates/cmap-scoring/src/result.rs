//! Scoring result records

use crate::Metrics;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of grading one learner map with one algorithm
///
/// Built fresh per run; serializes to a flat JSON record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    /// Algorithm name (`mcclure`, `novak`, `lea`)
    pub method: &'static str,

    /// Earned points including every bonus
    pub total_score: u32,

    /// Maximum attainable points
    pub max_score: u32,

    /// Percentage of the maximum, 0-100
    pub percentage: f64,

    /// Precision/recall/F, absent in simple-score-only mode
    pub metrics: Option<Metrics>,

    /// Number of learner links (or matched pairs) per score value
    pub score_counts: BTreeMap<u8, usize>,

    /// Bonus points outside the per-link rubric
    pub bonuses: Bonuses,

    /// Non-fatal problems found while normalizing either map
    pub diagnostics: Vec<String>,

    /// Algorithm-specific detail
    pub detail: ScoringDetail,
}

/// Bonus points awarded outside the per-link rubric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Bonuses {
    /// Learner propositions that are many-to-one or one-to-many
    pub limitation_count: usize,

    /// Points for limitation structures
    pub limitation_score: u32,

    /// Learner links labelled as cross links
    pub conflict_count: usize,

    /// Points per cross link after clamping
    pub cross_link_point_per_item: u8,

    /// Points for cross links
    pub cross_link_score: u32,
}

/// Algorithm-specific part of a result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoringDetail {
    /// Per-proposition scoring (McClure, Novak)
    Proposition {
        /// One entry per learner link, in learner order
        links: Vec<LinkScore>,
        /// Learner links earning the perfect score
        matched_count: usize,
        /// Reference links after normalization
        master_links: usize,
        /// Learner links after normalization
        student_links: usize,
        /// Summed per-link scores, before bonuses
        proposition_score: u32,
    },

    /// Set-overlap scoring over an optimal assignment (LEA)
    Causal {
        /// `(reference_index, learner_index)` pairs
        assignment: Vec<(usize, usize)>,
        /// Pairs that took part in the assignment
        matched_pairs: usize,
        /// Reference links left out
        unmatched_answers: usize,
        /// Learner links left out
        unmatched_students: usize,
        /// Share of the larger list in the assignment
        coverage_rate: f64,
        /// Raw score over the maximum possible score
        score_rate: f64,
        /// Reference link count
        answer_count: usize,
        /// Learner link count
        student_count: usize,
    },
}

/// Score of one learner link under a per-proposition rubric
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkScore {
    /// Learner link id
    pub link_id: String,

    /// Learner proposition the link came from
    pub original_id: String,

    /// Antecedent display id
    pub antecedent: String,

    /// Consequent display id
    pub consequent: String,

    /// Label as written
    pub label: String,

    /// Points awarded
    pub score: u8,

    /// Which rule fired (`perfect`, `direction-mismatch`, `label-mismatch`, `no-match`)
    pub match_kind: &'static str,

    /// Original id of the reference link that satisfied the rule
    pub matched_reference: Option<String>,
}

impl ScoringResult {
    /// One-line summary for logs
    pub fn summary(&self) -> String {
        let mut line = format!(
            "{}: {}/{} ({:.1}%)",
            self.method, self.total_score, self.max_score, self.percentage
        );
        if let Some(metrics) = &self.metrics {
            line.push_str(&format!(
                ", P={:.3} R={:.3} F={:.3}",
                metrics.precision, metrics.recall, metrics.f_value
            ));
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ScoringResult {
        ScoringResult {
            method: "mcclure",
            total_score: 6,
            max_score: 9,
            percentage: 200.0 / 3.0,
            metrics: Some(Metrics::new(2.0 / 3.0, 0.5)),
            score_counts: BTreeMap::from([(3, 2), (0, 1)]),
            bonuses: Bonuses::default(),
            diagnostics: Vec::new(),
            detail: ScoringDetail::Proposition {
                links: Vec::new(),
                matched_count: 2,
                master_links: 4,
                student_links: 3,
                proposition_score: 6,
            },
        }
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            sample().summary(),
            "mcclure: 6/9 (66.7%), P=0.667 R=0.500 F=0.571"
        );
    }

    #[test]
    fn test_serializes_tagged_detail() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["method"], "mcclure");
        assert_eq!(json["detail"]["kind"], "proposition");
        assert_eq!(json["detail"]["matched_count"], 2);
        assert_eq!(json["score_counts"]["3"], 2);
        assert_eq!(json["bonuses"]["cross_link_score"], 0);
    }
}
