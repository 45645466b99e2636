//! Concept Map Scoring
//!
//! Grades a learner's concept map against an expert reference map.
//!
//! # Overview
//!
//! The scoring engine provides:
//! - **Rubric A** (per proposition, 0-3): [`McClureRubric`] and [`NovakRubric`]
//! - **Rubric B** (set overlap, 0-4): [`SetOverlapRubric`]
//! - **Optimal matching**: [`OptimalMatcher`], an exhaustive search for the
//!   assignment maximizing the summed Rubric B score
//! - **Metrics**: precision, recall, F-value and coverage under two separate
//!   conventions ([`proposition_metrics`], [`calculate_f_value`])
//! - **Algorithms**: `mcclure`, `novak` and `lea`, reached through the static
//!   [`ALGORITHMS`] table and the [`score`] entry point
//!
//! # Usage
//!
//! ```
//! use cmap_domain::RawProposition;
//! use cmap_scoring::{score, ScoringDetail, ScoringOptions};
//!
//! let master = vec![
//!     RawProposition::new("m1", "A", "B", "causes"),
//!     RawProposition::new("m2", "B", "C", "causes"),
//! ];
//! let student = vec![RawProposition::new("s1", "B", "C", "causes")];
//!
//! let result = score("lea", &master, &student, &ScoringOptions::default()).unwrap();
//! assert_eq!(result.total_score, 4);
//! assert!(matches!(result.detail, ScoringDetail::Causal { matched_pairs: 1, .. }));
//! ```
//!
//! # Search size
//!
//! Optimal matching evaluates `N! / (N - k)!` candidate assignments, where `N`
//! is the larger link list and `k` the smaller one. The default ceiling is
//! 10! (ten links on each side); larger inputs fail with
//! [`MatchError::SearchTooLarge`] instead of running for hours. See
//! [`MatcherConfig`].
//!
//! # Concurrency
//!
//! Scoring is synchronous and side-effect free. Every call owns its own
//! normalizer, rubric and matcher, so independent calls can run on separate
//! threads without coordination.

#![warn(missing_docs)]

mod config;
mod error;
mod matcher;
mod metrics;
mod result;
mod rubric;

pub mod algorithms;
pub mod registry;

pub use config::{MatcherConfig, ScoringOptions, MAX_CONFLICT_BONUS};
pub use error::{MatchError, ScoringError};
pub use matcher::{candidate_count, score_assignment, OptimalMatcher};
pub use metrics::{
    calculate_f_value, f_measure, proposition_metrics, CausalMetrics, Metrics,
};
pub use registry::{algorithm_names, find_algorithm, score, AlgorithmInfo, GradeFn, ALGORITHMS};
pub use result::{Bonuses, LinkScore, ScoringDetail, ScoringResult};
pub use rubric::{count_conflicts, McClureRubric, NovakRubric, SetOverlapRubric};
