//! Error types for assumption loading, projection and formatting

use thiserror::Error;

/// Errors surfaced by the pro-forma pipeline
#[derive(Debug, Error)]
pub enum ProFormaError {
    /// Projection horizon must be at least one year
    #[error("invalid projection horizon: {0} years (must be at least 1)")]
    InvalidHorizon(i64),

    /// An asset entry that cannot be depreciated; dropped from the run
    #[error("invalid asset {entry:?}: {reason}")]
    InvalidAsset { entry: String, reason: String },

    /// A value that cannot be rendered at the requested precision
    #[error("cannot format {value} with {decimals} decimals: {reason}")]
    Formatting {
        value: f64,
        decimals: usize,
        reason: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProFormaError {
    pub(crate) fn invalid_asset(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        ProFormaError::InvalidAsset {
            entry: entry.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, ProFormaError>;
