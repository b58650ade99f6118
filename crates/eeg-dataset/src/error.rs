//! Dataset Error Types

use thiserror::Error;

/// Errors while loading or querying the EEG dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    /// File could not be opened
    #[error("Failed to open dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV or a missing/unparseable column
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Value out of allowed range
    #[error("Row {row}: {field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        row: usize,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// NaN or infinite feature value
    #[error("Row {row}: {field} is not a finite number")]
    NonFinite { row: usize, field: &'static str },

    /// Label other than 0 (phone) or 1 (study)
    #[error("Row {row}: unknown label {label} (expected 0 or 1)")]
    UnknownLabel { row: usize, label: i64 },

    /// Dataset has no rows
    #[error("Dataset contains no rows")]
    Empty,

    /// Row index past the end
    #[error("Row index {index} out of range (dataset has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    /// Column name not among the feature columns
    #[error("Unknown feature column: {0}")]
    UnknownColumn(String),
}
