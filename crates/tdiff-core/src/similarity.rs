//! String similarity scorers.
//!
//! Every scorer returns a percentage-style value in `0.0..=100.0`, gives
//! [`MAX_SCORE`] for identical inputs (including two empty strings), and is
//! symmetric in its arguments. The same scorer drives both the headline
//! similarity of a comparison and the modified-pair decision of the aligner.

use similar::TextDiff;

/// Score of two identical strings.
pub const MAX_SCORE: f64 = 100.0;

/// A symmetric similarity metric over two strings.
///
/// Any `Fn(&str, &str) -> f64` closure that is `Send + Sync` implements this
/// trait, so callers can inject an ad-hoc metric without a wrapper type.
pub trait Similarity: Send + Sync {
    /// Similarity of `a` and `b` in `0.0..=100.0`.
    fn score(&self, a: &str, b: &str) -> f64;

    /// Name of the metric for logging.
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> f64 + Send + Sync,
{
    fn score(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Normalized indel similarity: `100 * 2M / (|a| + |b|)` where `M` is the
/// number of characters kept by a minimal character diff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ratio;

impl Similarity for Ratio {
    fn score(&self, a: &str, b: &str) -> f64 {
        ratio(a, b)
    }

    fn name(&self) -> &'static str {
        "ratio"
    }
}

/// Normalized Levenshtein similarity: `100 * (1 - d / max(|a|, |b|))`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Similarity for Levenshtein {
    fn score(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return MAX_SCORE;
        }
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let max_len = a.len().max(b.len());
        let distance = levenshtein_distance(&a, &b);
        (1.0 - distance as f64 / max_len as f64) * MAX_SCORE
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Wrapper that lowercases both inputs before delegating to the inner metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaseInsensitive<S>(pub S);

impl<S: Similarity> Similarity for CaseInsensitive<S> {
    fn score(&self, a: &str, b: &str) -> f64 {
        self.0.score(&a.to_lowercase(), &b.to_lowercase())
    }

    fn name(&self) -> &'static str {
        self.0.name()
    }
}

/// The default scorer as a free function.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return MAX_SCORE;
    }
    let diff = TextDiff::from_chars(a, b);
    f64::from(diff.ratio()) * MAX_SCORE
}

fn levenshtein_distance(a: &[char], b: &[char]) -> usize {
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
