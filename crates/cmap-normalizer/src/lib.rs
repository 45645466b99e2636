//! Concept Map Normalizer
//!
//! Turns raw propositions into a canonical set of simple binary links.
//!
//! The Normalizer provides:
//! - Structure classification (one-to-one, many-to-one, one-to-many, many-to-many)
//! - Junction expansion of multi-node structures
//! - Qualifier decomposition as an alternative expansion mode
//! - Deduplication on `(antecedent, consequent, label)`
//! - Diagnostics for unsupported many-to-many structures
//!
//! # Examples
//!
//! ```
//! use cmap_domain::RawProposition;
//! use cmap_normalizer::{Normalizer, NormalizerConfig};
//!
//! let normalizer = Normalizer::new(NormalizerConfig::default());
//! let map = normalizer.normalize(&[
//!     RawProposition::new("p1", "1 2", "3", "causes"),
//!     RawProposition::new("p2", "1 2", "3 4", "causes"),
//! ]);
//!
//! // Two junction links plus the main link; the many-to-many row is skipped
//! assert_eq!(map.links.len(), 3);
//! assert_eq!(map.diagnostics.len(), 1);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod expander;

pub use config::{ExpansionMode, NormalizerConfig};
pub use error::NormalizerError;
pub use expander::{
    decompose_qualifiers, Diagnostic, DiagnosticKind, Expansion, NormalizedMap, Normalizer,
    QualifierRows,
};
