//! Proposition expansion logic

use crate::{ExpansionMode, NormalizerConfig};
use cmap_domain::label::QUALIFIER_LABEL;
use cmap_domain::{
    ExpandedLink, Junction, JunctionKind, Label, NodeRef, RawProposition, StructureKind,
};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A non-fatal problem found while normalizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Id of the offending proposition
    pub proposition_id: String,

    /// What went wrong
    pub kind: DiagnosticKind,
}

/// Diagnostic categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Many-to-many structure; the proposition produced no links
    StructureUnsupported {
        /// Antecedent ids as written
        antecedents: String,
        /// Consequent ids as written
        consequent: String,
    },
}

impl Diagnostic {
    /// Many-to-many diagnostic for a skipped proposition
    pub fn structure_unsupported(prop: &RawProposition) -> Self {
        Self {
            proposition_id: prop.id.clone(),
            kind: DiagnosticKind::StructureUnsupported {
                antecedents: prop.antecedents.clone(),
                consequent: prop.consequent.clone(),
            },
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            DiagnosticKind::StructureUnsupported {
                antecedents,
                consequent,
            } => write!(
                f,
                "many-to-many proposition skipped (id: {}, antecedents: '{}', consequent: '{}')",
                self.proposition_id, antecedents, consequent
            ),
        }
    }
}

/// Links produced from a single raw proposition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Expansion {
    /// Expanded links; the main link is always last
    pub links: Vec<ExpandedLink>,

    /// Structure of the source proposition, if it had nodes on both sides
    pub structure: Option<StructureKind>,

    /// Diagnostic raised for this proposition, if any
    pub diagnostic: Option<Diagnostic>,
}

/// Normalized link set for one concept map
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedMap {
    /// Deduplicated links in first-occurrence order
    pub links: Vec<ExpandedLink>,

    /// Diagnostics collected over all propositions
    pub diagnostics: Vec<Diagnostic>,

    /// Raw propositions that are many-to-one or one-to-many
    pub limitation_count: usize,
}

/// Raw rows after qualifier decomposition
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QualifierRows {
    /// Decomposed rows in input order
    pub rows: Vec<RawProposition>,

    /// Many-to-many rows that were skipped
    pub diagnostics: Vec<Diagnostic>,
}

/// The Normalizer expands raw propositions into binary links
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    /// Create a new Normalizer with the given configuration
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Create a Normalizer with default configuration (junction mode)
    pub fn default_config() -> Self {
        Self::new(NormalizerConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize every proposition of a map and deduplicate the result
    pub fn normalize(&self, propositions: &[RawProposition]) -> NormalizedMap {
        let mut links = Vec::new();
        let mut diagnostics = Vec::new();
        let mut limitation_count = 0;

        for prop in propositions {
            let expansion = self.expand(prop);

            if expansion.structure.is_some_and(|s| s.is_limitation()) {
                limitation_count += 1;
            }
            if let Some(diagnostic) = expansion.diagnostic {
                diagnostics.push(diagnostic);
            }
            links.extend(expansion.links);
        }

        let expanded_total = links.len();
        if self.config.dedup {
            links = dedup_links(links);
        }

        debug!(
            "Normalized {} propositions into {} links ({} duplicates dropped, {} diagnostics, mode: {})",
            propositions.len(),
            links.len(),
            expanded_total - links.len(),
            diagnostics.len(),
            self.config.expansion_mode
        );

        NormalizedMap {
            links,
            diagnostics,
            limitation_count,
        }
    }

    /// Expand a single proposition according to the configured mode
    ///
    /// Rows with no node on either side produce nothing. Many-to-many rows
    /// produce nothing plus a diagnostic, except in `none` mode where no
    /// expansion is attempted.
    pub fn expand(&self, prop: &RawProposition) -> Expansion {
        let antecedents = prop.antecedent_ids();
        let consequents = prop.consequent_ids();

        let Some(structure) = StructureKind::classify(&antecedents, &consequents) else {
            return Expansion::default();
        };

        if self.config.expansion_mode == ExpansionMode::None {
            return Expansion {
                links: vec![self.passthrough(prop, &antecedents, &consequents)],
                structure: Some(structure),
                diagnostic: None,
            };
        }

        let links = match structure {
            StructureKind::ManyToMany => {
                warn!(
                    "Many-to-many propositions are not supported, skipping (id: {}, antecedents: '{}', consequent: '{}')",
                    prop.id, prop.antecedents, prop.consequent
                );
                return Expansion {
                    links: Vec::new(),
                    structure: Some(structure),
                    diagnostic: Some(Diagnostic::structure_unsupported(prop)),
                };
            }
            StructureKind::OneToOne => vec![ExpandedLink::new(
                prop.id.as_str(),
                prop.id.as_str(),
                false,
                NodeRef::plain(antecedents[0].as_str()),
                NodeRef::plain(consequents[0].as_str()),
                Label::new(prop.label.as_str()),
            )],
            StructureKind::ManyToOne => match self.config.expansion_mode {
                ExpansionMode::Qualifier => self.decompose_many_to_one(prop, &antecedents, &consequents),
                _ => self.expand_many_to_one(prop, &antecedents, &consequents),
            },
            StructureKind::OneToMany => self.expand_one_to_many(prop, &antecedents, &consequents),
        };

        Expansion {
            links,
            structure: Some(structure),
            diagnostic: None,
        }
    }

    /// `A, B -> D` becomes `A -> to(D)`, `B -> to(D)`, `from(A, B) -> D`
    fn expand_many_to_one(
        &self,
        prop: &RawProposition,
        antecedents: &[String],
        consequents: &[String],
    ) -> Vec<ExpandedLink> {
        let (Some(to_node), Some(from_node)) = (
            Junction::new(JunctionKind::To, consequents.iter().map(String::as_str)),
            Junction::new(JunctionKind::From, antecedents.iter().map(String::as_str)),
        ) else {
            return Vec::new();
        };

        let mut links: Vec<ExpandedLink> = antecedents
            .iter()
            .map(|ante| {
                ExpandedLink::new(
                    format!("{}-{}-A", prop.id, ante),
                    prop.id.as_str(),
                    true,
                    NodeRef::plain(ante.as_str()),
                    NodeRef::Junction(to_node.clone()),
                    self.junction_label(),
                )
            })
            .collect();

        links.push(self.main_link(
            prop,
            NodeRef::Junction(from_node),
            NodeRef::plain(consequents[0].as_str()),
        ));
        links
    }

    /// `A -> B, C` becomes `from(A) -> B`, `from(A) -> C`, `A -> to(B, C)`
    fn expand_one_to_many(
        &self,
        prop: &RawProposition,
        antecedents: &[String],
        consequents: &[String],
    ) -> Vec<ExpandedLink> {
        let (Some(from_node), Some(to_node)) = (
            Junction::new(JunctionKind::From, antecedents.iter().map(String::as_str)),
            Junction::new(JunctionKind::To, consequents.iter().map(String::as_str)),
        ) else {
            return Vec::new();
        };

        let mut links: Vec<ExpandedLink> = consequents
            .iter()
            .map(|conq| {
                ExpandedLink::new(
                    format!("{}-{}-C", prop.id, conq),
                    prop.id.as_str(),
                    true,
                    NodeRef::Junction(from_node.clone()),
                    NodeRef::plain(conq.as_str()),
                    self.junction_label(),
                )
            })
            .collect();

        links.push(self.main_link(
            prop,
            NodeRef::plain(antecedents[0].as_str()),
            NodeRef::Junction(to_node),
        ));
        links
    }

    /// `A, B, C -> D` becomes `A -> D`, `A -> B [Qualifier]`, `A -> C [Qualifier]`
    fn decompose_many_to_one(
        &self,
        prop: &RawProposition,
        antecedents: &[String],
        consequents: &[String],
    ) -> Vec<ExpandedLink> {
        let base = &antecedents[0];

        let mut links = vec![self.main_link(
            prop,
            NodeRef::plain(base.as_str()),
            NodeRef::plain(consequents[0].as_str()),
        )];
        links.extend(antecedents[1..].iter().enumerate().map(|(idx, qualifier)| {
            ExpandedLink::new(
                format!("{}-q-{}", prop.id, idx + 1),
                prop.id.as_str(),
                true,
                NodeRef::plain(base.as_str()),
                NodeRef::plain(qualifier.as_str()),
                Label::new(QUALIFIER_LABEL),
            )
        }));
        links
    }

    fn passthrough(
        &self,
        prop: &RawProposition,
        antecedents: &[String],
        consequents: &[String],
    ) -> ExpandedLink {
        ExpandedLink::new(
            prop.id.as_str(),
            prop.id.as_str(),
            false,
            NodeRef::plain(antecedents.join(" ")),
            NodeRef::plain(consequents.join(" ")),
            Label::new(prop.label.as_str()),
        )
    }

    fn main_link(&self, prop: &RawProposition, antecedent: NodeRef, consequent: NodeRef) -> ExpandedLink {
        ExpandedLink::new(
            format!("{}-main", prop.id),
            prop.id.as_str(),
            true,
            antecedent,
            consequent,
            Label::new(prop.label.as_str()),
        )
    }

    fn junction_label(&self) -> Label {
        Label::new(self.config.junction_label.as_str())
    }
}

/// Keep the first link for every `(antecedent, consequent, label)` key
fn dedup_links(links: Vec<ExpandedLink>) -> Vec<ExpandedLink> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.dedup_key()))
        .collect()
}

/// Decompose many-to-one rows into a main row plus qualifier rows
///
/// Works on raw propositions so the set-based path can use it before
/// building causal links. The base node is the first sorted antecedent, as in
/// qualifier-mode expansion. One-to-one and one-to-many rows are kept as-is,
/// many-to-many rows are skipped with a diagnostic, and rows without nodes on
/// both sides are dropped.
pub fn decompose_qualifiers(propositions: &[RawProposition]) -> QualifierRows {
    let mut result = QualifierRows::default();

    for prop in propositions {
        let antecedents = prop.antecedent_ids();
        let consequents = prop.consequent_ids();

        match StructureKind::classify(&antecedents, &consequents) {
            None => debug!("Skipping proposition without nodes: {}", prop.id),
            Some(StructureKind::ManyToMany) => {
                warn!(
                    "Many-to-many propositions are not supported, skipping (id: {}, antecedents: '{}', consequent: '{}')",
                    prop.id, prop.antecedents, prop.consequent
                );
                result.diagnostics.push(Diagnostic::structure_unsupported(prop));
            }
            Some(StructureKind::ManyToOne) => {
                let base = antecedents[0].as_str();
                result.rows.push(RawProposition::new(
                    format!("{}-main", prop.id),
                    base,
                    consequents[0].as_str(),
                    prop.label.as_str(),
                ));
                for (idx, qualifier) in antecedents[1..].iter().enumerate() {
                    result.rows.push(RawProposition::new(
                        format!("{}-q-{}", prop.id, idx + 1),
                        base,
                        qualifier.as_str(),
                        QUALIFIER_LABEL,
                    ));
                }
            }
            Some(StructureKind::OneToOne | StructureKind::OneToMany) => {
                result.rows.push(prop.clone());
            }
        }
    }

    result
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn node_list() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-d1-3]", 1..=3).prop_map(|ids| ids.join(" "))
    }

    proptest! {
        /// Property: normalized maps never contain two links with the same key
        #[test]
        fn test_no_duplicate_keys(
            rows in prop::collection::vec((node_list(), node_list(), "[xy]"), 0..8),
        ) {
            let props: Vec<_> = rows
                .into_iter()
                .enumerate()
                .map(|(i, (a, c, l))| RawProposition::new(format!("p{}", i), a, c, l))
                .collect();

            let map = Normalizer::default_config().normalize(&props);
            let keys: HashSet<_> = map.links.iter().map(|l| l.dedup_key()).collect();
            prop_assert_eq!(keys.len(), map.links.len());
        }

        /// Property: every row yields links or a diagnostic, never both
        #[test]
        fn test_links_xor_diagnostic(a in node_list(), c in node_list()) {
            let expansion = Normalizer::default_config()
                .expand(&RawProposition::new("p", a, c, "x"));
            prop_assert!(expansion.links.is_empty() != expansion.diagnostic.is_none());
        }
    }
}
