//! Text comparison: line alignment, word expansion, and the final report.
//!
//! Both texts are split into lines and aligned. Every line that is not
//! unchanged is expanded into its changed words, and the whole texts are
//! scored with the configured similarity metric.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::align::{Aligner, LinePosition, DEFAULT_MODIFIED_THRESHOLD};
use crate::config::{validate_threshold, CompareConfig, ScorerKind, SplitterKind};
use crate::error::CompareResult;
use crate::expand::expand;
use crate::item::DiffItem;
use crate::similarity::{CaseInsensitive, Levenshtein, Ratio, Similarity};
use crate::tokenize::{Characters, Tokenizer, Whitespace};

/// A changed line together with its changed words.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineComparison {
    /// The removed, added, or modified line.
    pub line: DiffItem,
    /// Removed, added, or modified words of the line, in alignment order.
    pub words: Vec<DiffItem>,
}

impl fmt::Display for LineComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words: Vec<String> = self.words.iter().map(ToString::to_string).collect();
        writeln!(f, "    line: {}", self.line)?;
        writeln!(f, "    words: [{}]", words.join(", "))
    }
}

/// The result of comparing two texts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextComparison {
    /// Similarity of the two whole texts, `0.0..=100.0`.
    pub similarity: f64,
    /// Changed lines in alignment order. Unchanged lines are omitted.
    pub lines: Vec<LineComparison>,
}

impl TextComparison {
    /// Returns `true` if no line changed.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of changed lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.lines.iter().filter(|l| l.line.is_added()).count()
    }

    /// Number of removed lines.
    pub fn removals(&self) -> usize {
        self.lines.iter().filter(|l| l.line.is_removed()).count()
    }

    /// Number of modified lines.
    pub fn modifications(&self) -> usize {
        self.lines.iter().filter(|l| l.line.is_modified()).count()
    }

    /// Total number of changed words across all lines.
    pub fn word_changes(&self) -> usize {
        self.lines.iter().map(|l| l.words.len()).sum()
    }
}

impl fmt::Display for TextComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "similarity: {}", self.similarity)?;
        writeln!(f, "lines: [")?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        write!(f, "]")
    }
}

/// Compares texts with an injected similarity metric and word splitter.
///
/// A `Comparator` holds no mutable state and is cheap to clone, so it can be
/// shared across threads comparing independent documents.
#[derive(Clone)]
pub struct Comparator {
    similarity: Arc<dyn Similarity>,
    splitter: Arc<dyn Tokenizer>,
    threshold: f64,
}

impl Default for Comparator {
    fn default() -> Self {
        Self {
            similarity: Arc::new(Ratio),
            splitter: Arc::new(Whitespace),
            threshold: DEFAULT_MODIFIED_THRESHOLD,
        }
    }
}

impl fmt::Debug for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Comparator")
            .field("similarity", &self.similarity.name())
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl Comparator {
    /// A comparator with the default ratio scorer, whitespace splitter and
    /// modified threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a comparator from declarative settings.
    pub fn from_config(config: &CompareConfig) -> CompareResult<Self> {
        config.validate()?;

        let similarity: Arc<dyn Similarity> = match (config.scorer, config.case_sensitive) {
            (ScorerKind::Ratio, true) => Arc::new(Ratio),
            (ScorerKind::Ratio, false) => Arc::new(CaseInsensitive(Ratio)),
            (ScorerKind::Levenshtein, true) => Arc::new(Levenshtein),
            (ScorerKind::Levenshtein, false) => Arc::new(CaseInsensitive(Levenshtein)),
        };
        let splitter: Arc<dyn Tokenizer> = match config.splitter {
            SplitterKind::Whitespace => Arc::new(Whitespace),
            SplitterKind::Characters => Arc::new(Characters),
        };

        Ok(Self {
            similarity,
            splitter,
            threshold: config.modified_threshold,
        })
    }

    /// Replace the similarity metric.
    pub fn with_similarity(mut self, similarity: impl Similarity + 'static) -> Self {
        self.similarity = Arc::new(similarity);
        self
    }

    /// Replace the word splitter.
    pub fn with_splitter(mut self, splitter: impl Tokenizer + 'static) -> Self {
        self.splitter = Arc::new(splitter);
        self
    }

    /// Replace the modified-pair threshold.
    pub fn with_threshold(mut self, threshold: f64) -> CompareResult<Self> {
        validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// An aligner borrowing this comparator's metric and threshold.
    pub fn aligner(&self) -> Aligner<'_> {
        Aligner::with_valid_threshold(self.similarity.as_ref(), self.threshold)
    }

    /// Similarity of two strings under the configured metric.
    pub fn score(&self, a: &str, b: &str) -> f64 {
        self.similarity.score(a, b)
    }

    /// Changed words of a single changed line.
    pub fn expand(&self, line: &DiffItem) -> Vec<DiffItem> {
        expand(line, self.splitter.as_ref(), &self.aligner())
    }

    /// Compare two texts line by line, then word by word within changed lines.
    pub fn compare(&self, left: &str, right: &str) -> TextComparison {
        let left_lines: Vec<&str> = left.lines().collect();
        let right_lines: Vec<&str> = right.lines().collect();

        let aligner = self.aligner();
        let mut position = LinePosition::default();
        let mut lines = Vec::new();

        for line in aligner.align(&left_lines, &right_lines) {
            position = position.advance(&line);
            if line.is_unchanged() {
                continue;
            }
            let words = expand(&line, self.splitter.as_ref(), &aligner);
            trace!(
                kind = line.kind(),
                left_line = position.left,
                right_line = position.right,
                words = words.len(),
                "changed line"
            );
            lines.push(LineComparison { line, words });
        }

        let similarity = self.similarity.score(left, right);
        debug!(
            scorer = self.similarity.name(),
            left_lines = left_lines.len(),
            right_lines = right_lines.len(),
            changed = lines.len(),
            similarity,
            "text comparison complete"
        );

        TextComparison { similarity, lines }
    }
}

/// Compare two texts with the default comparator.
pub fn compare(left: &str, right: &str) -> TextComparison {
    Comparator::default().compare(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;
    use crate::similarity::MAX_SCORE;

    fn lc(line: DiffItem, words: Vec<DiffItem>) -> LineComparison {
        LineComparison { line, words }
    }

    #[test]
    fn empty_texts() {
        let result = compare("", "");
        assert_eq!(result.similarity, MAX_SCORE);
        assert!(result.lines.is_empty());
    }

    #[test]
    fn identical_texts() {
        let text = "hello world\nhow are you";
        assert_eq!(
            compare(text, text),
            TextComparison {
                similarity: MAX_SCORE,
                lines: vec![],
            }
        );
    }

    #[test]
    fn removed_line() {
        assert_eq!(
            compare("a", "").lines,
            vec![lc(DiffItem::removed("a"), vec![DiffItem::removed("a")])]
        );
    }

    #[test]
    fn added_line() {
        assert_eq!(
            compare("", "a").lines,
            vec![lc(DiffItem::added("a"), vec![DiffItem::added("a")])]
        );
    }

    #[test]
    fn replaced_line() {
        assert_eq!(
            compare("a", "b").lines,
            vec![
                lc(DiffItem::removed("a"), vec![DiffItem::removed("a")]),
                lc(DiffItem::added("b"), vec![DiffItem::added("b")]),
            ]
        );
    }

    #[test]
    fn single_word_modification() {
        assert_eq!(
            compare("ab", "abb").lines,
            vec![lc(
                DiffItem::modified("ab", "abb"),
                vec![DiffItem::modified("ab", "abb")]
            )]
        );
    }

    #[test]
    fn unchanged_lines_and_words_are_excluded() {
        let result = compare("hello world\nhow are you", "hello world\nhow are yoou");
        assert_eq!(
            result.lines,
            vec![lc(
                DiffItem::modified("how are you", "how are yoou"),
                vec![DiffItem::modified("you", "yoou")]
            )]
        );
        assert!(result.similarity < MAX_SCORE);
        assert!(result.similarity > 90.0);
    }

    #[test]
    fn summary_counters() {
        let result = compare(
            "keep\nthe cat sat\ndrop this line\n",
            "keep\nthe cats sat\nsomething new entirely\nextra\n",
        );
        assert_eq!(result.modifications(), 1);
        assert_eq!(result.len(), result.additions() + result.removals() + result.modifications());
        assert!(result.word_changes() >= result.len());
    }

    #[test]
    fn trailing_newline_is_not_a_line() {
        assert!(compare("one\ntwo\n", "one\ntwo").is_empty());
    }

    #[test]
    fn injected_similarity_is_used_everywhere() {
        let comparator = Comparator::new().with_similarity(|a: &str, b: &str| {
            if a.len() == b.len() {
                MAX_SCORE
            } else {
                0.0
            }
        });
        let result = comparator.compare("cat", "dog");
        assert_eq!(result.similarity, MAX_SCORE);
        assert_eq!(
            result.lines,
            vec![lc(
                DiffItem::modified("cat", "dog"),
                vec![DiffItem::modified("cat", "dog")]
            )]
        );
    }

    #[test]
    fn injected_splitter_is_used() {
        let comparator = Comparator::new().with_splitter(|line: &str| -> Vec<String> {
            line.split(',').map(str::to_owned).collect()
        });
        let result = comparator.compare("a,b,c", "a,b,d");
        assert_eq!(
            result.lines[0].words,
            vec![DiffItem::removed("c"), DiffItem::added("d")]
        );
    }

    #[test]
    fn threshold_is_validated() {
        assert_eq!(
            Comparator::new().with_threshold(101.0).unwrap_err(),
            CompareError::InvalidThreshold(101.0)
        );
        assert_eq!(Comparator::new().with_threshold(0.0).unwrap().threshold(), 0.0);
    }

    #[test]
    fn from_config_case_insensitive() {
        let config = CompareConfig {
            case_sensitive: false,
            ..Default::default()
        };
        let comparator = Comparator::from_config(&config).unwrap();
        assert_eq!(comparator.score("Hello", "hello"), MAX_SCORE);
        assert_eq!(
            comparator.compare("Hello", "hello").lines,
            vec![lc(
                DiffItem::modified("Hello", "hello"),
                vec![DiffItem::modified("Hello", "hello")]
            )]
        );
    }

    #[test]
    fn display_lists_lines_and_words() {
        let text = compare("ab", "abb").to_string();
        assert!(text.contains("line: Modified: ab -> abb"));
        assert!(text.contains("words: [Modified: ab -> abb]"));
    }

    #[test]
    fn comparator_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Comparator>();
    }

    #[test]
    fn json_report_shape() {
        let value = serde_json::to_value(compare("ab", "abb")).unwrap();
        assert_eq!(value["lines"][0]["line"]["kind"], "modified");
        assert_eq!(value["lines"][0]["words"][0]["after"], "abb");
    }
}
