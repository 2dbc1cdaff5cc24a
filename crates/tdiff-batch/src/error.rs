use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("duplicate row id in manifest: {0}")]
    DuplicateRow(String),

    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("comparison task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type BatchResult<T> = Result<T, BatchError>;
