//! Character-level masks for modified items.
//!
//! Uses the `similar` crate (Myers diff over chars) to find which characters
//! of each version take part in the edit.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use similar::{DiffTag, TextDiff};

/// Changed character ranges on each side of a modified item.
///
/// Ranges are in `char` indices, not bytes, and never overlap or touch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharMask {
    /// Ranges of `before` that were deleted or replaced.
    pub before: Vec<Range<usize>>,
    /// Ranges of `after` that were inserted or replaced.
    pub after: Vec<Range<usize>>,
}

impl CharMask {
    /// Returns `true` if neither side has a changed character.
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }

    /// Total number of changed characters in `before`.
    pub fn before_len(&self) -> usize {
        self.before.iter().map(|r| r.len()).sum()
    }

    /// Total number of changed characters in `after`.
    pub fn after_len(&self) -> usize {
        self.after.iter().map(|r| r.len()).sum()
    }
}

/// Compute the character masks between two versions of a token.
pub fn char_masks(before: &str, after: &str) -> CharMask {
    let diff = TextDiff::from_chars(before, after);
    let mut mask = CharMask::default();

    for op in diff.ops() {
        match op.tag() {
            DiffTag::Equal => {}
            DiffTag::Delete => push_range(&mut mask.before, op.old_range()),
            DiffTag::Insert => push_range(&mut mask.after, op.new_range()),
            DiffTag::Replace => {
                push_range(&mut mask.before, op.old_range());
                push_range(&mut mask.after, op.new_range());
            }
        }
    }

    mask
}

/// Append a range, merging it into the previous one when they touch.
fn push_range(ranges: &mut Vec<Range<usize>>, range: Range<usize>) {
    if range.is_empty() {
        return;
    }
    match ranges.last_mut() {
        Some(last) if last.end >= range.start => last.end = last.end.max(range.end),
        _ => ranges.push(range),
    }
}
