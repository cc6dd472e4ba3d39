//! Error types for the feature pipeline.

use chrono::NaiveDate;
use thiserror::Error;

/// Feature pipeline error.
///
/// Only input-contract violations surface as errors. Numeric edge cases
/// (flat ranges, warm-up gaps, zero denominators) resolve to the `None`
/// sentinel in the affected cell and never raise.
#[derive(Error, Debug)]
pub enum FeatureError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Duplicate date in series: {0}")]
    DuplicateDate(NaiveDate),

    #[error("Out-of-order date in series: {0}")]
    OutOfOrderDate(NaiveDate),

    #[error("Column length mismatch for '{column}': expected {expected} rows, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Non-finite {field} at row {row} ({date})")]
    NonFiniteInput {
        field: &'static str,
        row: usize,
        date: NaiveDate,
    },
}

/// Result type alias for feature operations.
pub type FeatureResult<T> = Result<T, FeatureError>;
