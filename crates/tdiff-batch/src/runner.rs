//! Concurrent comparison of manifest rows.
//!
//! Each row is an independent unit of work: both transcripts are read, then
//! compared on the blocking pool. At most `concurrency` rows run at once.
//! Rows finish in any order; the reports are put back in manifest order once
//! every row is done. A failing row produces a report carrying its error and
//! does not stop the others.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use tdiff_core::{Comparator, TextComparison};

use crate::error::{BatchError, BatchResult};
use crate::manifest::BatchRow;

/// Outcome of comparing one row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RowReport {
    pub id: String,
    /// Present when the row was compared successfully.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<TextComparison>,
    /// Present when reading or comparing the row failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RowReport {
    pub fn success(id: String, comparison: TextComparison) -> Self {
        Self {
            id,
            comparison: Some(comparison),
            error: None,
        }
    }

    pub fn failure(id: String, error: String) -> Self {
        Self {
            id,
            comparison: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.comparison.is_some()
    }
}

/// Aggregate figures over a finished batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub failures: usize,
    /// Mean similarity of the successful rows, `None` if there are none.
    pub mean_similarity: Option<f64>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[RowReport]) -> Self {
        let scores: Vec<f64> = reports
            .iter()
            .filter_map(|r| r.comparison.as_ref())
            .map(|c| c.similarity)
            .collect();
        let mean_similarity = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        };

        Self {
            rows: reports.len(),
            failures: reports.len() - scores.len(),
            mean_similarity,
        }
    }
}

/// Compare every row, running at most `concurrency` rows at a time.
///
/// Returns one report per row, in the order of `rows`.
pub async fn run_batch(
    rows: Vec<BatchRow>,
    comparator: Arc<Comparator>,
    concurrency: usize,
) -> BatchResult<Vec<RowReport>> {
    if concurrency == 0 {
        return Err(BatchError::InvalidConcurrency);
    }

    let total = rows.len();
    info!(rows = total, concurrency, "batch started");

    let permits = Arc::new(Semaphore::new(concurrency));
    let mut tasks = JoinSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        let permits = Arc::clone(&permits);
        let comparator = Arc::clone(&comparator);
        tasks.spawn(async move {
            let report = match permits.acquire_owned().await {
                Ok(_permit) => compare_row(row, comparator).await,
                Err(_) => RowReport::failure(row.id, "batch cancelled".into()),
            };
            (index, report)
        });
    }

    let mut slots: Vec<Option<RowReport>> = vec![None; total];
    while let Some(joined) = tasks.join_next().await {
        let (index, report) = joined?;
        debug!(id = %report.id, success = report.is_success(), "row finished");
        slots[index] = Some(report);
    }

    let reports: Vec<RowReport> = slots.into_iter().flatten().collect();
    info!(
        rows = reports.len(),
        failures = reports.iter().filter(|r| !r.is_success()).count(),
        "batch finished"
    );
    Ok(reports)
}

async fn compare_row(row: BatchRow, comparator: Arc<Comparator>) -> RowReport {
    match try_compare_row(&row, comparator).await {
        Ok(comparison) => RowReport::success(row.id, comparison),
        Err(e) => {
            warn!(id = %row.id, error = %e, "row comparison failed");
            RowReport::failure(row.id, e.to_string())
        }
    }
}

async fn try_compare_row(
    row: &BatchRow,
    comparator: Arc<Comparator>,
) -> BatchResult<TextComparison> {
    let reference = read_transcript(&row.reference_path).await?;
    let hypothesis = read_transcript(&row.hypothesis_path).await?;

    let comparison =
        tokio::task::spawn_blocking(move || comparator.compare(&reference, &hypothesis)).await?;
    Ok(comparison)
}

async fn read_transcript(path: &std::path::Path) -> BatchResult<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| BatchError::Read {
            path: path.to_path_buf(),
            source,
        })
}
