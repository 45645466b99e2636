//! Junction module - synthetic nodes standing for groups of real nodes
//!
//! A junction is built once at expansion time as a tagged value and carries its
//! display id alongside. String ids are only parsed when a caller hands us a raw
//! id, and anything that does not parse fails closed.

use std::collections::BTreeSet;
use std::fmt;

/// Display prefix of a junction aggregating several antecedents
pub const FROM_JUNCTION_PREFIX: &str = "from-junction-";

/// Display prefix of a junction fanning out to several consequents
pub const TO_JUNCTION_PREFIX: &str = "to-junction-";

/// Separator between backing node ids in a junction display id
pub const JUNCTION_NODE_SEPARATOR: &str = "-";

/// Which side of a structure a junction stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JunctionKind {
    /// Conjunction of causes (`from-junction-...`)
    From,

    /// Group of effects (`to-junction-...`)
    To,
}

impl JunctionKind {
    /// Display prefix for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            JunctionKind::From => FROM_JUNCTION_PREFIX,
            JunctionKind::To => TO_JUNCTION_PREFIX,
        }
    }
}

/// A synthetic junction node
///
/// Invariant: `nodes` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Junction {
    kind: JunctionKind,
    nodes: BTreeSet<String>,
    display_id: String,
}

impl Junction {
    /// Create a junction over the given node ids
    ///
    /// Returns `None` if no non-empty node id is supplied.
    pub fn new<I, S>(kind: JunctionKind, nodes: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let nodes: BTreeSet<String> = nodes
            .into_iter()
            .map(Into::into)
            .filter(|n| !n.is_empty())
            .collect();

        if nodes.is_empty() {
            return None;
        }

        let joined = nodes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(JUNCTION_NODE_SEPARATOR);
        let display_id = format!("{}{}", kind.prefix(), joined);

        Some(Self {
            kind,
            nodes,
            display_id,
        })
    }

    /// Parse a junction from its display id
    ///
    /// Returns `None` for an unrecognized prefix or an empty backing set.
    pub fn parse(id: &str) -> Option<Self> {
        let (kind, rest) = if let Some(rest) = id.strip_prefix(FROM_JUNCTION_PREFIX) {
            (JunctionKind::From, rest)
        } else if let Some(rest) = id.strip_prefix(TO_JUNCTION_PREFIX) {
            (JunctionKind::To, rest)
        } else {
            return None;
        };

        Self::new(kind, rest.split(JUNCTION_NODE_SEPARATOR))
    }

    /// Junction kind
    pub fn kind(&self) -> JunctionKind {
        self.kind
    }

    /// Backing node ids
    pub fn nodes(&self) -> &BTreeSet<String> {
        &self.nodes
    }

    /// Display id, e.g. `from-junction-1-2`
    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    /// Whether this junction is a subset of `reference` of the same kind
    pub fn is_subset_of(&self, reference: &Junction) -> bool {
        self.kind == reference.kind && self.nodes.is_subset(&reference.nodes)
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_id)
    }
}

/// A node endpoint of an expanded link
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// A real node id from the map
    Plain(String),

    /// A synthetic junction
    Junction(Junction),
}

impl NodeRef {
    /// Create a plain node reference
    pub fn plain(id: impl Into<String>) -> Self {
        NodeRef::Plain(id.into())
    }

    /// Display id of this endpoint
    pub fn id(&self) -> &str {
        match self {
            NodeRef::Plain(id) => id,
            NodeRef::Junction(junction) => junction.display_id(),
        }
    }

    /// Whether this (learner) endpoint subset-matches a reference endpoint
    ///
    /// Plain nodes never subset-match anything.
    pub fn is_subset_match(&self, reference: &NodeRef) -> bool {
        match (self, reference) {
            (NodeRef::Junction(learner), NodeRef::Junction(reference)) => {
                learner.is_subset_of(reference)
            }
            _ => false,
        }
    }

    /// Equality or subset match against a reference endpoint
    pub fn matches(&self, reference: &NodeRef) -> bool {
        self == reference || self.is_subset_match(reference)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Subset match on raw display ids
///
/// Unrecognized or malformed ids never match.
///
/// # Examples
///
/// ```
/// use cmap_domain::is_subset_match;
///
/// assert!(is_subset_match("from-junction-1", "from-junction-1-2"));
/// assert!(!is_subset_match("to-junction-3", "from-junction-3"));
/// ```
pub fn is_subset_match(learner_id: &str, reference_id: &str) -> bool {
    match (Junction::parse(learner_id), Junction::parse(reference_id)) {
        (Some(learner), Some(reference)) => learner.is_subset_of(&reference),
        _ => false,
    }
}

/// Whether a learner link's endpoints match a reference link's endpoints
///
/// Each side matches by equality or by junction subset match.
pub fn nodes_match(
    learner_antecedent: &NodeRef,
    learner_consequent: &NodeRef,
    reference_antecedent: &NodeRef,
    reference_consequent: &NodeRef,
) -> bool {
    learner_antecedent.matches(reference_antecedent)
        && learner_consequent.matches(reference_consequent)
}
