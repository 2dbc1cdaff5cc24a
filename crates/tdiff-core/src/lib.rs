//! Diff reconciliation engine for transcripts.
//!
//! Compares two texts (typically a ground-truth transcript and a machine
//! generated one) line by line, then word by word inside every changed line,
//! and reports a similarity score with the structured differences.
//!
//! # Key Types
//!
//! - [`DiffItem`] -- Unchanged / Removed / Added / Modified token
//! - [`Aligner`] -- LCS alignment with modified-pair detection
//! - [`Comparator`] / [`TextComparison`] / [`LineComparison`] -- Text-level comparison
//! - [`Similarity`] / [`Tokenizer`] -- Pluggable scoring and word splitting
//! - [`CompareConfig`] -- TOML-loadable settings

pub mod align;
pub mod compare;
pub mod config;
pub mod error;
pub mod expand;
pub mod item;
pub mod mask;
pub mod similarity;
pub mod tokenize;

pub use align::{align, Aligner, LinePosition, DEFAULT_MODIFIED_THRESHOLD};
pub use compare::{compare, Comparator, LineComparison, TextComparison};
pub use config::{CompareConfig, ScorerKind, SplitterKind};
pub use error::{CompareError, CompareResult};
pub use expand::expand;
pub use item::DiffItem;
pub use mask::{char_masks, CharMask};
pub use similarity::{ratio, CaseInsensitive, Levenshtein, Ratio, Similarity, MAX_SCORE};
pub use tokenize::{Characters, Tokenizer, Whitespace};
