//! Word-level expansion of a changed line.

use crate::align::Aligner;
use crate::item::DiffItem;
use crate::tokenize::Tokenizer;

/// Re-align the words of a changed line and return the changed words.
///
/// A removed line yields only removed words and an added line only added
/// words. A modified line is aligned word by word and its unchanged words are
/// dropped. Unchanged lines are never expanded and yield nothing.
pub fn expand(line: &DiffItem, splitter: &dyn Tokenizer, aligner: &Aligner<'_>) -> Vec<DiffItem> {
    let (left, right) = match line {
        DiffItem::Unchanged { .. } => return Vec::new(),
        DiffItem::Removed { content } => (splitter.split(content), Vec::new()),
        DiffItem::Added { content } => (Vec::new(), splitter.split(content)),
        DiffItem::Modified { before, after } => (splitter.split(before), splitter.split(after)),
    };

    aligner
        .align(&left, &right)
        .into_iter()
        .filter(|word| !word.is_unchanged())
        .collect()
}
