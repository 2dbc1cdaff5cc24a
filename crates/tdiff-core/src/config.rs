//! Declarative comparison settings.
//!
//! A [`CompareConfig`] names built-in scorers and splitters so it can be
//! stored as TOML. Arbitrary closures are injected on [`crate::Comparator`]
//! directly instead.

use serde::{Deserialize, Serialize};

use crate::align::DEFAULT_MODIFIED_THRESHOLD;
use crate::error::{CompareError, CompareResult};
use crate::similarity::MAX_SCORE;

/// Built-in similarity metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorerKind {
    #[default]
    Ratio,
    Levenshtein,
}

/// Built-in word splitters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitterKind {
    #[default]
    Whitespace,
    Characters,
}

/// Settings for a [`crate::Comparator`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Score a removed/added pair must exceed to be reported as modified.
    pub modified_threshold: f64,
    /// Metric for the headline similarity and modified-pair detection.
    pub scorer: ScorerKind,
    /// How changed lines are split into words.
    pub splitter: SplitterKind,
    /// When `false`, scoring ignores letter case. Token equality stays exact.
    pub case_sensitive: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            modified_threshold: DEFAULT_MODIFIED_THRESHOLD,
            scorer: ScorerKind::Ratio,
            splitter: SplitterKind::Whitespace,
            case_sensitive: true,
        }
    }
}

impl CompareConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> CompareResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| CompareError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> CompareResult<String> {
        toml::to_string(self).map_err(|e| CompareError::Config(e.to_string()))
    }

    pub fn validate(&self) -> CompareResult<()> {
        validate_threshold(self.modified_threshold)
    }
}

pub(crate) fn validate_threshold(threshold: f64) -> CompareResult<()> {
    if (0.0..=MAX_SCORE).contains(&threshold) {
        Ok(())
    } else {
        Err(CompareError::InvalidThreshold(threshold))
    }
}
