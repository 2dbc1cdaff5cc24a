//! Classified diff items shared by the line and word levels.
//!
//! A [`DiffItem`] is one token of an alignment tagged with how it changed from
//! the left sequence to the right one. The same type is used for lines and for
//! the words inside a changed line.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mask::{char_masks, CharMask};

/// A single classified token produced by the aligner.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiffItem {
    /// The token is identical on both sides.
    Unchanged { content: String },
    /// The token exists only on the left side.
    Removed { content: String },
    /// The token exists only on the right side.
    Added { content: String },
    /// A left token close enough to a right token to count as an edit.
    Modified { before: String, after: String },
}

impl DiffItem {
    pub fn unchanged(content: impl Into<String>) -> Self {
        Self::Unchanged {
            content: content.into(),
        }
    }

    pub fn removed(content: impl Into<String>) -> Self {
        Self::Removed {
            content: content.into(),
        }
    }

    pub fn added(content: impl Into<String>) -> Self {
        Self::Added {
            content: content.into(),
        }
    }

    pub fn modified(before: impl Into<String>, after: impl Into<String>) -> Self {
        Self::Modified {
            before: before.into(),
            after: after.into(),
        }
    }

    /// Returns `true` if the token did not change.
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged { .. })
    }

    /// Returns `true` if the token was removed going from left to right.
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }

    /// Returns `true` if the token was added going from left to right.
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }

    /// Returns `true` if the token was edited going from left to right.
    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Modified { .. })
    }

    /// The token text, or `None` for a modified item.
    ///
    /// A modified item has two versions, so there is no single content.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Unchanged { content } | Self::Removed { content } | Self::Added { content } => {
                Some(content)
            }
            Self::Modified { .. } => None,
        }
    }

    /// The left version of a changed token: `None` if it was added or did
    /// not change.
    pub fn content_before(&self) -> Option<&str> {
        match self {
            Self::Removed { content } => Some(content),
            Self::Unchanged { .. } | Self::Added { .. } => None,
            Self::Modified { before, .. } => Some(before),
        }
    }

    /// The right version of a changed token: `None` if it was removed or did
    /// not change.
    pub fn content_after(&self) -> Option<&str> {
        match self {
            Self::Added { content } => Some(content),
            Self::Unchanged { .. } | Self::Removed { .. } => None,
            Self::Modified { after, .. } => Some(after),
        }
    }

    /// Short lowercase name of the variant, used in logs and renderers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unchanged { .. } => "unchanged",
            Self::Removed { .. } => "removed",
            Self::Added { .. } => "added",
            Self::Modified { .. } => "modified",
        }
    }

    /// The same change seen from the right side: removals become additions
    /// and modified items swap their two versions.
    pub fn inverted(&self) -> Self {
        match self {
            Self::Unchanged { content } => Self::unchanged(content.as_str()),
            Self::Removed { content } => Self::added(content.as_str()),
            Self::Added { content } => Self::removed(content.as_str()),
            Self::Modified { before, after } => Self::modified(after.as_str(), before.as_str()),
        }
    }

    /// Character ranges that differ between the two versions of a modified
    /// item. `None` for every other variant.
    pub fn char_masks(&self) -> Option<CharMask> {
        match self {
            Self::Modified { before, after } => Some(char_masks(before, after)),
            _ => None,
        }
    }
}

impl fmt::Display for DiffItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged { content } => write!(f, "Unchanged: {content}"),
            Self::Removed { content } => write!(f, "Removed: {content}"),
            Self::Added { content } => write!(f, "Added: {content}"),
            Self::Modified { before, after } => write!(f, "Modified: {before} -> {after}"),
        }
    }
}
