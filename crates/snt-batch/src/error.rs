//! Error types for batch processing.
//!
//! ## Purpose
//!
//! Wraps single-row estimation failures with the row they came from, and
//! adds the failure modes of reading and writing tables and config files.
//!
//! ## Design notes
//!
//! * A failing row is reported in its own result slot; other rows go on.
//! * Configuration errors from the core crate pass through unchanged.

// External dependencies
use thiserror::Error;

// Export dependencies from snt crate
use snt::prelude::SntError;

/// Error type for batch processing.
#[derive(Debug, Error)]
pub enum BatchError {
    /// Estimation of one row failed.
    #[error("Row {row}: {source}")]
    Row {
        /// Zero-based row index.
        row: usize,
        /// Failure reported by the estimator.
        source: SntError,
    },

    /// Options were rejected before any row ran.
    #[error(transparent)]
    Config(#[from] SntError),

    /// A file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A table could not be parsed or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A config or header file could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input table does not have the expected shape.
    #[error("Invalid table: {0}")]
    InvalidFormat(String),

    /// The worker pool could not be started.
    #[cfg(feature = "parallel")]
    #[error("Thread pool error: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl BatchError {
    /// Row index of a per-row failure.
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::Row { row, .. } => Some(*row),
            _ => None,
        }
    }
}
