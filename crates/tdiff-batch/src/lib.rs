//! Batch comparison of transcript pairs.
//!
//! Reads a manifest of `(id, reference, hypothesis)` rows and compares every
//! pair concurrently, producing one report per row keyed by its id.

pub mod error;
pub mod manifest;
pub mod runner;

pub use error::{BatchError, BatchResult};
pub use manifest::{BatchRow, Manifest};
pub use runner::{run_batch, BatchSummary, RowReport};
