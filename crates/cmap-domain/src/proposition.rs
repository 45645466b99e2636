//! Proposition module - raw rows as read from a concept map

/// A raw proposition, one per input row
///
/// Antecedents and consequents are space-separated node id lists exactly as
/// supplied by ingestion. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProposition {
    /// Proposition identifier
    pub id: String,

    /// Space-separated antecedent node ids
    pub antecedents: String,

    /// Space-separated consequent node ids
    pub consequent: String,

    /// Relation label
    pub label: String,
}

impl RawProposition {
    /// Create a new raw proposition
    pub fn new(
        id: impl Into<String>,
        antecedents: impl Into<String>,
        consequent: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            antecedents: antecedents.into(),
            consequent: consequent.into(),
            label: label.into(),
        }
    }

    /// Sorted antecedent node ids
    pub fn antecedent_ids(&self) -> Vec<String> {
        normalize_ids(&self.antecedents)
    }

    /// Sorted consequent node ids
    pub fn consequent_ids(&self) -> Vec<String> {
        normalize_ids(&self.consequent)
    }

    /// Classify the structure of this proposition
    ///
    /// Returns `None` when either side has no node ids.
    pub fn structure(&self) -> Option<StructureKind> {
        StructureKind::classify(&self.antecedent_ids(), &self.consequent_ids())
    }
}

/// Split a node id list on whitespace, drop empties and sort lexicographically
///
/// # Examples
///
/// ```
/// use cmap_domain::normalize_ids;
///
/// assert_eq!(normalize_ids("C A B"), vec!["A", "B", "C"]);
/// assert!(normalize_ids("").is_empty());
/// ```
pub fn normalize_ids(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    ids.sort();
    ids
}

/// Shape of a proposition by the cardinality of each side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    /// Single antecedent, single consequent
    OneToOne,

    /// Several antecedents feeding one consequent
    ManyToOne,

    /// One antecedent fanning out to several consequents
    OneToMany,

    /// Several antecedents and several consequents (unsupported for expansion)
    ManyToMany,
}

impl StructureKind {
    /// Classify from normalized id lists
    pub fn classify(antecedents: &[String], consequents: &[String]) -> Option<Self> {
        if antecedents.is_empty() || consequents.is_empty() {
            return None;
        }

        let kind = match (antecedents.len() > 1, consequents.len() > 1) {
            (false, false) => StructureKind::OneToOne,
            (true, false) => StructureKind::ManyToOne,
            (false, true) => StructureKind::OneToMany,
            (true, true) => StructureKind::ManyToMany,
        };
        Some(kind)
    }

    /// Whether this structure counts as a limitation (many-to-one or one-to-many)
    pub fn is_limitation(&self) -> bool {
        matches!(self, StructureKind::ManyToOne | StructureKind::OneToMany)
    }

    /// Get the structure name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureKind::OneToOne => "one-to-one",
            StructureKind::ManyToOne => "many-to-one",
            StructureKind::OneToMany => "one-to-many",
            StructureKind::ManyToMany => "many-to-many",
        }
    }
}
