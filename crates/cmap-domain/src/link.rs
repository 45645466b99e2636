//! Link module - the two link representations compared by the rubrics

use crate::{normalize_ids, Label, NodeRef, RawProposition};
use std::collections::BTreeSet;
use std::fmt;

/// A simple binary link produced by expanding one raw proposition
///
/// Created during expansion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedLink {
    /// Link id (`originalId`, `originalId-main`, or a synthesized junction link id)
    pub id: String,

    /// Id of the raw proposition this link came from
    pub original_id: String,

    /// Whether the source proposition was expanded
    pub was_expanded: bool,

    /// Antecedent endpoint
    pub antecedent: NodeRef,

    /// Consequent endpoint
    pub consequent: NodeRef,

    /// Relation label
    pub label: Label,
}

impl ExpandedLink {
    /// Create a new expanded link
    pub fn new(
        id: impl Into<String>,
        original_id: impl Into<String>,
        was_expanded: bool,
        antecedent: NodeRef,
        consequent: NodeRef,
        label: Label,
    ) -> Self {
        Self {
            id: id.into(),
            original_id: original_id.into(),
            was_expanded,
            antecedent,
            consequent,
            label,
        }
    }

    /// Deduplication key `(antecedent, consequent, label)`
    ///
    /// Endpoints compare as tagged nodes, so junctions over different node
    /// sets stay distinct even when their display ids coincide. The label part
    /// is the text as written, so two links differing only in label case are
    /// both kept.
    pub fn dedup_key(&self) -> (NodeRef, NodeRef, String) {
        (
            self.antecedent.clone(),
            self.consequent.clone(),
            self.label.as_str().to_string(),
        )
    }
}

impl fmt::Display for ExpandedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} [{}]",
            self.antecedent, self.consequent, self.label
        )
    }
}

/// A set-based link used by the set-overlap rubric
///
/// One link per raw proposition; multi-node sides are compared as sets.
#[derive(Debug, Clone, PartialEq)]
pub struct CausalLink {
    /// Antecedent node ids
    pub antecedents: BTreeSet<String>,

    /// Consequent node ids
    pub consequents: BTreeSet<String>,

    /// Relation label
    pub label: Label,
}

impl CausalLink {
    /// Create a causal link from node id collections
    pub fn new<A, C, S>(antecedents: A, consequents: C, label: impl Into<Label>) -> Self
    where
        A: IntoIterator<Item = S>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            antecedents: antecedents.into_iter().map(Into::into).collect(),
            consequents: consequents.into_iter().map(Into::into).collect(),
            label: label.into(),
        }
    }

    /// Build a causal link from a raw proposition (no junction expansion)
    pub fn from_raw(prop: &RawProposition) -> Self {
        Self {
            antecedents: normalize_ids(&prop.antecedents).into_iter().collect(),
            consequents: normalize_ids(&prop.consequent).into_iter().collect(),
            label: Label::new(prop.label.as_str()),
        }
    }

    /// Whether both sides carry at least one node
    pub fn is_well_formed(&self) -> bool {
        !self.antecedents.is_empty() && !self.consequents.is_empty()
    }
}

impl fmt::Display for CausalLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<String>| {
            set.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
        };
        write!(
            f,
            "{{{}}} -> {{{}}} [{}]",
            join(&self.antecedents),
            join(&self.consequents),
            self.label
        )
    }
}
