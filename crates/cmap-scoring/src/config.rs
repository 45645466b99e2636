//! Configuration for scoring runs
//!
//! Defines the search ceiling for the optimal matcher and the per-run options
//! every algorithm receives.

use crate::ScoringError;
use cmap_normalizer::{ExpansionMode, NormalizerConfig};
use serde::{Deserialize, Serialize};

/// Upper bound for the per-item cross-link bonus
pub const MAX_CONFLICT_BONUS: u8 = 4;

/// Limits for the exhaustive matching search
///
/// The search evaluates `P(N, k) = N! / (N - k)!` candidate assignments, where
/// `N` is the larger list and `k` the smaller one.
///
/// # Examples
///
/// ```
/// use cmap_scoring::MatcherConfig;
///
/// // Default: up to 10! candidates (ten links on each side)
/// let config = MatcherConfig::default();
/// assert_eq!(config.max_candidates, 3_628_800);
///
/// // Strict: 8! candidates
/// let config = MatcherConfig::strict();
/// assert_eq!(config.max_candidates, 40_320);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Refuse the search above this many candidate assignments
    /// Default: 3,628,800 (10!)
    #[serde(default = "default_max_candidates")]
    pub max_candidates: u64,

    /// Log a warning above this many candidate assignments
    /// Default: 362,880 (9!)
    #[serde(default = "default_warn_candidates")]
    pub warn_candidates: u64,
}

fn default_max_candidates() -> u64 {
    3_628_800
}

fn default_warn_candidates() -> u64 {
    362_880
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            max_candidates: default_max_candidates(),
            warn_candidates: default_warn_candidates(),
        }
    }
}

impl MatcherConfig {
    /// Strict ceiling (8!) for interactive use
    pub fn strict() -> Self {
        Self {
            max_candidates: 40_320,
            warn_candidates: 5_040,
        }
    }

    /// Lenient ceiling (12!) for batch grading with time to spare
    pub fn lenient() -> Self {
        Self {
            max_candidates: 479_001_600,
            warn_candidates: 39_916_800,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.max_candidates == 0 {
            return Err(ScoringError::Config(
                "max_candidates must be greater than 0".to_string(),
            ));
        }
        if self.warn_candidates > self.max_candidates {
            return Err(ScoringError::Config(format!(
                "warn_candidates ({}) must not exceed max_candidates ({})",
                self.warn_candidates, self.max_candidates
            )));
        }
        Ok(())
    }
}

/// Options shared by every scoring algorithm
///
/// Can be loaded from TOML:
///
/// ```toml
/// expansion_mode = "junction"
/// conflict_bonus = 2
/// simple_score_only = false
///
/// [matcher]
/// max_candidates = 3628800
/// warn_candidates = 362880
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringOptions {
    /// How multi-node propositions are expanded
    #[serde(default)]
    pub expansion_mode: ExpansionMode,

    /// Points per learner cross link (`conflict` label), clamped to 0-4
    #[serde(default)]
    pub conflict_bonus: u8,

    /// Skip precision/recall/F computation
    #[serde(default)]
    pub simple_score_only: bool,

    /// Matching search limits
    #[serde(default)]
    pub matcher: MatcherConfig,
}

impl ScoringOptions {
    /// Options with the given expansion mode and defaults otherwise
    pub fn with_mode(expansion_mode: ExpansionMode) -> Self {
        Self {
            expansion_mode,
            ..Self::default()
        }
    }

    /// Cross-link bonus per item after clamping
    pub fn conflict_bonus_per_item(&self) -> u8 {
        self.conflict_bonus.min(MAX_CONFLICT_BONUS)
    }

    /// Normalizer configuration derived from these options
    pub fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig::with_mode(self.expansion_mode)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<(), ScoringError> {
        self.matcher.validate()?;
        self.normalizer_config().validate()?;
        Ok(())
    }
}
