// Error types shared by the advice catalog, BMI calculator, dataset and report handling

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthError {
    /// Condition name outside the fixed catalog
    #[error("Unknown condition: {0:?}")]
    UnknownCondition(String),

    /// Numeric input outside the accepted range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Malformed request parameters
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Column {0} is not numeric")]
    NotNumeric(String),

    /// Dataset could not be read or parsed
    #[error("Dataset error: {0}")]
    Dataset(#[from] csv::Error),

    #[error("Unsupported report {path:?}: {reason}")]
    UnsupportedReport { path: PathBuf, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HealthError>;
