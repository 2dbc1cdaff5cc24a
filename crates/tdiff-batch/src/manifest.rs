//! Batch manifests: the list of transcript pairs to compare.
//!
//! A manifest is a JSON document:
//!
//! ```json
//! { "rows": [ { "id": "session-1",
//!               "reference_path": "truth/session-1.txt",
//!               "hypothesis_path": "asr/session-1.txt" } ] }
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BatchError, BatchResult};

/// One unit of work: a reference transcript and a hypothesis to compare.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    /// Identity of the row; reports are keyed by it.
    pub id: String,
    /// Ground-truth transcript (left side).
    pub reference_path: PathBuf,
    /// Generated transcript (right side).
    pub hypothesis_path: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub rows: Vec<BatchRow>,
}

impl Manifest {
    /// Parse a manifest and check that row ids are unique.
    pub fn from_json(source: &str) -> BatchResult<Self> {
        let manifest: Self = serde_json::from_str(source)?;
        manifest.check_unique_ids()?;
        Ok(manifest)
    }

    /// Read a manifest from disk, resolving relative row paths against the
    /// manifest's own directory.
    pub async fn load(path: &Path) -> BatchResult<Self> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BatchError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let mut manifest = Self::from_json(&source)?;
        if let Some(base) = path.parent() {
            manifest.resolve_against(base);
        }
        Ok(manifest)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn resolve_against(&mut self, base: &Path) {
        for row in &mut self.rows {
            if row.reference_path.is_relative() {
                row.reference_path = base.join(&row.reference_path);
            }
            if row.hypothesis_path.is_relative() {
                row.hypothesis_path = base.join(&row.hypothesis_path);
            }
        }
    }

    fn check_unique_ids(&self) -> BatchResult<()> {
        let mut seen = HashSet::new();
        for row in &self.rows {
            if !seen.insert(row.id.as_str()) {
                return Err(BatchError::DuplicateRow(row.id.clone()));
            }
        }
        Ok(())
    }
}
