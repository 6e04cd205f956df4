//! Error types for the Scorecard library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Scorecard operations.
///
/// Column lookup problems (missing or ambiguous "total" columns) are not
/// errors of this type; they are reported per feature as
/// [`ColumnIssue`](crate::analysis::ColumnIssue).
#[derive(Debug, Error)]
pub enum ScorecardError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the workbook reader.
    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chart drawing or image encoding failed.
    #[error("Render error: {0}")]
    Render(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Scorecard operations.
pub type Result<T> = std::result::Result<T, ScorecardError>;
