//! Error types for the comparison engine.

/// Errors raised while configuring a comparison.
///
/// Alignment and scoring themselves are total; only configuration can fail.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    /// The modified-pair threshold is outside the score range or NaN.
    #[error("modified threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f64),

    /// The configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias for comparison results.
pub type CompareResult<T> = Result<T, CompareError>;
