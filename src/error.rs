//! Error types for loading, filtering and exporting.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The dataset file could not be read.
    #[error("dataset unavailable at {}: {source}", path.display())]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The dataset was read but does not have the expected shape.
    #[error("malformed dataset: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// Merger sizes start at 1 ("unchanged").
    #[error("invalid merger size {0}: sizes must be at least 1")]
    InvalidMergerSize(i64),

    /// Assembling or writing the CSV export failed.
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),

    /// Input table for `convert` is not valid CSV.
    #[error("csv line {line}: {message}")]
    Csv { line: usize, message: String },
}

impl Error {
    /// Whether the session must stop. Everything else is contained to the
    /// operation that raised it.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DataUnavailable { .. } | Error::MalformedData(_))
    }
}
