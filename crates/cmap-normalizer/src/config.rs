//! Normalizer configuration

use crate::NormalizerError;
use cmap_domain::label::JUNCTION_LABEL;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How multi-node propositions are turned into binary links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// Keep every proposition as a single link
    None,

    /// Split many-to-one rows into a main link plus qualifier links
    Qualifier,

    /// Expand through synthetic junction nodes
    #[default]
    Junction,
}

impl ExpansionMode {
    /// Get the mode name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpansionMode::None => "none",
            ExpansionMode::Qualifier => "qualifier",
            ExpansionMode::Junction => "junction",
        }
    }
}

impl fmt::Display for ExpansionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpansionMode {
    type Err = NormalizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(ExpansionMode::None),
            "qualifier" => Ok(ExpansionMode::Qualifier),
            "junction" => Ok(ExpansionMode::Junction),
            other => Err(NormalizerError::InvalidExpansionMode(other.to_string())),
        }
    }
}

/// Configuration for proposition normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Expansion mode
    #[serde(default)]
    pub expansion_mode: ExpansionMode,

    /// Label given to synthesized junction links
    #[serde(default = "default_junction_label")]
    pub junction_label: String,

    /// Drop links repeating an earlier `(antecedent, consequent, label)`
    #[serde(default = "default_dedup")]
    pub dedup: bool,
}

fn default_junction_label() -> String {
    JUNCTION_LABEL.to_string()
}

fn default_dedup() -> bool {
    true
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            expansion_mode: ExpansionMode::Junction,
            junction_label: default_junction_label(),
            dedup: true,
        }
    }
}

impl NormalizerConfig {
    /// Configuration using the given expansion mode and default settings otherwise
    pub fn with_mode(expansion_mode: ExpansionMode) -> Self {
        Self {
            expansion_mode,
            ..Self::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), NormalizerError> {
        if self.junction_label.trim().is_empty() {
            return Err(NormalizerError::Config(
                "junction_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
