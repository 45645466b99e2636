//! Label module - relation labels compared case- and whitespace-insensitively

use std::fmt;

/// Label attached to every junction link created by expansion
pub const JUNCTION_LABEL: &str = "Junction";

/// Label attached to qualifier links created by qualifier decomposition
pub const QUALIFIER_LABEL: &str = "Qualifier";

/// Normalized label value marking a cross link
pub const CONFLICT_LABEL: &str = "conflict";

/// A relation label
///
/// Keeps the text as written for display and a normalized form (trimmed,
/// lowercased, inner whitespace collapsed) used for every comparison.
#[derive(Debug, Clone, Eq)]
pub struct Label {
    raw: String,
    normalized: String,
}

impl Label {
    /// Create a new label
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let normalized = normalize_label(&raw);
        Self { raw, normalized }
    }

    /// Label as written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Normalized comparison key
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Whether this label marks a cross link
    pub fn is_conflict(&self) -> bool {
        self.normalized == CONFLICT_LABEL
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.normalized == other.normalized
    }
}

impl std::hash::Hash for Label {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized.hash(state);
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_normalization() {
        let label = Label::new("  CAUSES  ");
        assert_eq!(label.normalized(), "causes");
        assert_eq!(label.as_str(), "  CAUSES  ");
    }

    #[test]
    fn test_label_equality_ignores_case_and_spacing() {
        assert_eq!(Label::new("Leads  To"), Label::new("leads to "));
        assert_ne!(Label::new("causes"), Label::new("prevents"));
    }

    #[test]
    fn test_conflict_label() {
        assert!(Label::new(" Conflict ").is_conflict());
        assert!(!Label::new("conflicts").is_conflict());
    }
}
