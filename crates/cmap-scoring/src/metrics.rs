//! Metrics calculation
//!
//! Two conventions coexist and are kept as separate computations:
//! - [`proposition_metrics`] for the per-proposition rubrics (McClure, Novak)
//! - [`calculate_f_value`] for set-overlap scoring with optimal matching

use serde::Serialize;

/// Precision, recall and their harmonic mean
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Metrics {
    /// Achievement relative to the learner's own links
    pub precision: f64,

    /// Achievement relative to the reference links
    pub recall: f64,

    /// Harmonic mean of precision and recall
    pub f_value: f64,
}

impl Metrics {
    /// Build metrics from precision and recall
    pub fn new(precision: f64, recall: f64) -> Self {
        Self {
            precision,
            recall,
            f_value: f_measure(precision, recall),
        }
    }
}

/// `2PR / (P + R)`, or 0 when both are 0
pub fn f_measure(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Division returning 0.0 for a zero denominator
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Score-based metrics for the per-proposition rubrics
///
/// - `precision = (proposition + limitation + cross_link) /
///   (student_links * perfect + limitation + cross_link)`
/// - `recall = (proposition + limitation) / (master_links * perfect + limitation)`
///
/// The cross-link bonus inflates the learner side only.
pub fn proposition_metrics(
    proposition_score: u32,
    perfect_score: u8,
    student_links: usize,
    master_links: usize,
    limitation_score: u32,
    cross_link_score: u32,
) -> Metrics {
    let perfect = f64::from(perfect_score);
    let proposition = f64::from(proposition_score);
    let limitation = f64::from(limitation_score);
    let cross_link = f64::from(cross_link_score);

    let earned = proposition + limitation + cross_link;
    let student_max = student_links as f64 * perfect + limitation + cross_link;
    let master_max = master_links as f64 * perfect + limitation;

    Metrics::new(
        ratio(earned, student_max),
        ratio(proposition + limitation, master_max),
    )
}

/// Metrics for set-overlap scoring over an optimal assignment
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CausalMetrics {
    /// Summed pair score of the assignment
    pub raw_score: u32,

    /// `answer_count * 4`
    pub max_possible_score: u32,

    /// `raw_score / max_possible_score`
    pub score_rate: f64,

    /// `raw_score / (answer_count * 4)`
    pub recall: f64,

    /// `raw_score / (student_count * 4)`
    pub precision: f64,

    /// Harmonic mean of precision and recall
    pub f_value: f64,

    /// Pairs that took part in the assignment
    pub matched_pairs: usize,

    /// Reference links left out of the assignment
    pub unmatched_answers: usize,

    /// Learner links left out of the assignment
    pub unmatched_students: usize,

    /// Share of the larger list that took part in the assignment
    pub coverage_rate: f64,
}

impl CausalMetrics {
    /// Precision, recall and F-value only
    pub fn metrics(&self) -> Metrics {
        Metrics {
            precision: self.precision,
            recall: self.recall,
            f_value: self.f_value,
        }
    }
}

/// Highest set-overlap score for a single pair
const MAX_LINK_SCORE: u32 = 4;

/// F-value over full denominators, counting unmatched links as 0
///
/// Returns all-zero rates when either list is empty.
///
/// # Examples
///
/// ```
/// use cmap_scoring::calculate_f_value;
///
/// let metrics = calculate_f_value(12, 3, 3, 3, 3);
/// assert_eq!(metrics.f_value, 1.0);
/// assert_eq!(metrics.coverage_rate, 1.0);
/// ```
pub fn calculate_f_value(
    raw_score: u32,
    answer_count: usize,
    student_count: usize,
    used_answers: usize,
    used_students: usize,
) -> CausalMetrics {
    if answer_count == 0 || student_count == 0 {
        return CausalMetrics {
            raw_score,
            unmatched_answers: answer_count,
            unmatched_students: student_count,
            ..CausalMetrics::default()
        };
    }

    let raw = f64::from(raw_score);
    let max_possible_score = answer_count as u32 * MAX_LINK_SCORE;
    let recall = ratio(raw, answer_count as f64 * f64::from(MAX_LINK_SCORE));
    let precision = ratio(raw, student_count as f64 * f64::from(MAX_LINK_SCORE));
    let matched_pairs = used_answers.min(used_students);

    CausalMetrics {
        raw_score,
        max_possible_score,
        score_rate: ratio(raw, f64::from(max_possible_score)),
        recall,
        precision,
        f_value: f_measure(precision, recall),
        matched_pairs,
        unmatched_answers: answer_count.saturating_sub(used_answers),
        unmatched_students: student_count.saturating_sub(used_students),
        coverage_rate: ratio(
            matched_pairs as f64,
            answer_count.max(student_count) as f64,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_f_value_perfect() {
        let metrics = calculate_f_value(12, 3, 3, 3, 3);
        assert_eq!(metrics.f_value, 1.0);
        assert_eq!(metrics.recall, 1.0);
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.max_possible_score, 12);
        assert_eq!(metrics.matched_pairs, 3);
    }

    #[test]
    fn test_f_value_unequal_sizes() {
        // 2 reference links, 4 learner links, both references matched exactly
        let metrics = calculate_f_value(8, 2, 4, 2, 2);
        assert!(approx(metrics.recall, 1.0));
        assert!(approx(metrics.precision, 0.5));
        assert!(approx(metrics.f_value, 2.0 / 3.0));
        assert!(approx(metrics.coverage_rate, 0.5));
        assert_eq!(metrics.unmatched_answers, 0);
        assert_eq!(metrics.unmatched_students, 2);
    }

    #[test]
    fn test_f_value_empty_lists() {
        let metrics = calculate_f_value(0, 0, 3, 0, 0);
        assert_eq!(metrics.f_value, 0.0);
        assert_eq!(metrics.coverage_rate, 0.0);
        assert_eq!(metrics.unmatched_students, 3);
        assert_eq!(metrics.max_possible_score, 0);
    }

    #[test]
    fn test_f_measure_zero() {
        assert_eq!(f_measure(0.0, 0.0), 0.0);
        assert!(approx(f_measure(0.5, 1.0), 2.0 / 3.0));
    }

    #[test]
    fn test_proposition_metrics_plain() {
        // 2 of 3 learner links exact, 4 reference links
        let metrics = proposition_metrics(6, 3, 3, 4, 0, 0);
        assert!(approx(metrics.precision, 6.0 / 9.0));
        assert!(approx(metrics.recall, 6.0 / 12.0));
    }

    #[test]
    fn test_cross_link_only_inflates_precision_side() {
        let metrics = proposition_metrics(3, 3, 2, 2, 4, 2);
        // (3 + 4 + 2) / (6 + 4 + 2)
        assert!(approx(metrics.precision, 9.0 / 12.0));
        // (3 + 4) / (6 + 4)
        assert!(approx(metrics.recall, 7.0 / 10.0));
    }

    #[test]
    fn test_proposition_metrics_empty() {
        let metrics = proposition_metrics(0, 3, 0, 0, 0, 0);
        assert_eq!(metrics, Metrics::default());
    }
}
