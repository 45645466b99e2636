//! Concept Map Domain Layer
//!
//! This crate contains the core domain model for grading a learner's concept map
//! against an expert reference map. It has ZERO external dependencies and defines
//! the value objects and trait interfaces the normalizer and scoring crates build on.
//!
//! ## Key Concepts
//!
//! - **Proposition**: A raw directed statement `antecedents -> consequent [label]`
//! - **Junction**: A synthetic node standing for a group of real nodes
//! - **Expanded link**: A simple binary link produced by junction expansion
//! - **Causal link**: A set-based link used by the set-overlap rubric
//! - **Match assignment**: Index pairs chosen by the optimal matcher
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure, deterministic functions only
//! - Scoring rubrics are plugged in through the traits in [`traits`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assignment;
pub mod junction;
pub mod label;
pub mod link;
pub mod proposition;
pub mod traits;

// Re-exports for convenience
pub use assignment::MatchAssignment;
pub use junction::{is_subset_match, nodes_match, Junction, JunctionKind, NodeRef};
pub use label::Label;
pub use link::{CausalLink, ExpandedLink};
pub use proposition::{normalize_ids, RawProposition, StructureKind};
pub use traits::{LinkComparator, MatchKind, PropositionRubric, RubricOutcome};
