//! Sequence alignment: the edit script between two token sequences.
//!
//! Tokens are matched with a longest-common-subsequence table walked from the
//! front, so equal tokens are matched as early as possible. The unmatched
//! tokens between two consecutive matches form a gap; inside a gap, the most
//! similar left/right pair scoring above the threshold becomes a
//! [`DiffItem::Modified`] and the sub-gaps on each side of it are paired the
//! same way. Whatever stays unpaired is emitted as removals, then additions.

use std::collections::BTreeMap;
use std::ops::Range;

use tracing::trace;

use crate::config::validate_threshold;
use crate::error::CompareResult;
use crate::item::DiffItem;
use crate::similarity::{Ratio, Similarity};

/// Default score a left/right pair must exceed to be reported as modified.
pub const DEFAULT_MODIFIED_THRESHOLD: f64 = 75.0;

/// Aligns token sequences with a given scorer and modified-pair threshold.
#[derive(Clone, Copy)]
pub struct Aligner<'a> {
    similarity: &'a dyn Similarity,
    threshold: f64,
}

impl<'a> Aligner<'a> {
    /// Create an aligner with the default modified threshold.
    pub fn new(similarity: &'a dyn Similarity) -> Self {
        Self {
            similarity,
            threshold: DEFAULT_MODIFIED_THRESHOLD,
        }
    }

    /// Replace the modified-pair threshold. It must lie within `0.0..=100.0`.
    pub fn with_threshold(mut self, threshold: f64) -> CompareResult<Self> {
        validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }

    /// Threshold already checked by the caller.
    pub(crate) fn with_valid_threshold(similarity: &'a dyn Similarity, threshold: f64) -> Self {
        Self {
            similarity,
            threshold,
        }
    }

    /// The modified-pair threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compute the edit script turning `left` into `right`.
    ///
    /// The result is ordered so that walking it with [`LinePosition::advance`]
    /// visits every left and every right token exactly once, in order.
    pub fn align<T: AsRef<str>>(&self, left: &[T], right: &[T]) -> Vec<DiffItem> {
        let mut items = Vec::with_capacity(left.len().max(right.len()));

        let prefix = left
            .iter()
            .zip(right)
            .take_while(|(l, r)| l.as_ref() == r.as_ref())
            .count();
        items.extend(
            left[..prefix]
                .iter()
                .map(|t| DiffItem::unchanged(t.as_ref())),
        );

        let left = &left[prefix..];
        let right = &right[prefix..];
        trace!(
            prefix,
            left = left.len(),
            right = right.len(),
            "aligning sequences"
        );

        let table = LcsTable::build(left, right);
        let (mut i, mut j) = (0, 0);
        let (mut gap_left, mut gap_right) = (0, 0);

        while i < left.len() && j < right.len() {
            if left[i].as_ref() == right[j].as_ref() {
                self.reconcile_gap(left, gap_left..i, right, gap_right..j, &mut items);
                items.push(DiffItem::unchanged(left[i].as_ref()));
                i += 1;
                j += 1;
                gap_left = i;
                gap_right = j;
            } else if table.get(i + 1, j) >= table.get(i, j + 1) {
                i += 1;
            } else {
                j += 1;
            }
        }
        self.reconcile_gap(
            left,
            gap_left..left.len(),
            right,
            gap_right..right.len(),
            &mut items,
        );

        items
    }

    /// Emit the items for one gap of unmatched tokens.
    fn reconcile_gap<T: AsRef<str>>(
        &self,
        left: &[T],
        left_gap: Range<usize>,
        right: &[T],
        right_gap: Range<usize>,
        out: &mut Vec<DiffItem>,
    ) {
        let pairs = self.gap_pairs(left, left_gap.clone(), right, right_gap.clone());
        let (mut li, mut ri) = (left_gap.start, right_gap.start);

        for (pl, pr) in pairs {
            out.extend(left[li..pl].iter().map(|t| DiffItem::removed(t.as_ref())));
            out.extend(right[ri..pr].iter().map(|t| DiffItem::added(t.as_ref())));
            out.push(DiffItem::modified(left[pl].as_ref(), right[pr].as_ref()));
            li = pl + 1;
            ri = pr + 1;
        }
        out.extend(left[li..left_gap.end].iter().map(|t| DiffItem::removed(t.as_ref())));
        out.extend(right[ri..right_gap.end].iter().map(|t| DiffItem::added(t.as_ref())));
    }

    /// The modified pairs of one gap, in sequence order.
    ///
    /// Every left/right pair is scored once. Pairs above the threshold are
    /// taken highest score first (ties: earliest left token, then earliest
    /// right); a pair is kept only if it does not cross one already kept.
    /// This is the same as taking the best pair of the gap and repeating on
    /// the sub-gaps before and after it.
    fn gap_pairs<T: AsRef<str>>(
        &self,
        left: &[T],
        left_gap: Range<usize>,
        right: &[T],
        right_gap: Range<usize>,
    ) -> Vec<(usize, usize)> {
        let limit = left_gap.len().min(right_gap.len());
        if limit == 0 {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for li in left_gap {
            for ri in right_gap.clone() {
                let score = self.similarity.score(left[li].as_ref(), right[ri].as_ref());
                if score > self.threshold {
                    candidates.push((li, ri, score));
                }
            }
        }
        candidates.sort_by(|a, b| b.2.total_cmp(&a.2).then(a.0.cmp(&b.0)).then(a.1.cmp(&b.1)));
        trace!(candidates = candidates.len(), limit, "pairing gap");

        let mut kept: BTreeMap<usize, usize> = BTreeMap::new();
        for (li, ri, _) in candidates {
            if kept.len() == limit {
                break;
            }
            let after_previous = kept
                .range(..=li)
                .next_back()
                .map_or(true, |(&pl, &pr)| pl < li && pr < ri);
            let before_next = kept.range(li + 1..).next().map_or(true, |(_, &nr)| ri < nr);
            if after_previous && before_next {
                kept.insert(li, ri);
            }
        }
        kept.into_iter().collect()
    }
}

/// Align two sequences with the default scorer and threshold.
pub fn align<T: AsRef<str>>(left: &[T], right: &[T]) -> Vec<DiffItem> {
    Aligner::new(&Ratio).align(left, right)
}

/// Suffix LCS lengths: `get(i, j)` is the LCS of `left[i..]` and `right[j..]`.
struct LcsTable {
    cells: Vec<u32>,
    width: usize,
}

impl LcsTable {
    fn build<T: AsRef<str>>(left: &[T], right: &[T]) -> Self {
        let width = right.len() + 1;
        let mut cells = vec![0u32; (left.len() + 1) * width];

        for i in (0..left.len()).rev() {
            for j in (0..right.len()).rev() {
                cells[i * width + j] = if left[i].as_ref() == right[j].as_ref() {
                    cells[(i + 1) * width + j + 1] + 1
                } else {
                    cells[(i + 1) * width + j].max(cells[i * width + j + 1])
                };
            }
        }

        Self { cells, width }
    }

    fn get(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.width + j]
    }
}

/// One-based cursor over the left and right sequences while walking an
/// alignment.
///
/// Unchanged and modified items advance both sides, removals only the left,
/// additions only the right. After advancing over an item, `left` / `right`
/// hold the line numbers that item occupies on the sides it touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinePosition {
    pub left: usize,
    pub right: usize,
}

impl LinePosition {
    pub fn advance(self, item: &DiffItem) -> Self {
        match item {
            DiffItem::Unchanged { .. } | DiffItem::Modified { .. } => Self {
                left: self.left + 1,
                right: self.right + 1,
            },
            DiffItem::Removed { .. } => Self {
                left: self.left + 1,
                ..self
            },
            DiffItem::Added { .. } => Self {
                right: self.right + 1,
                ..self
            },
        }
    }
}
