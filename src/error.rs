//! Error types for the sampling pipeline

use crate::dates::DateParseError;
use chrono::NaiveDate;

/// Pipeline error types
///
/// The pipeline has no partial-failure mode: the first error halts the batch
/// and names the record that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// A date field could not be parsed
    MalformedDate {
        /// Index of the record in the input batch
        record: usize,
        /// Name of the offending field
        field: &'static str,
        /// Raw field value
        value: String,
    },
    /// Tenure starts after it ends
    InvalidInterval {
        record: usize,
        label: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Configuration rejected before sampling
    InvalidConfig(String),
    /// Input document could not be decoded
    Input(String),
    /// Output could not be written
    Output(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::MalformedDate {
                record,
                field,
                value,
            } => write!(
                f,
                "Malformed date in record {}: field '{}' has value '{}'",
                record, field, value
            ),
            PipelineError::InvalidInterval {
                record,
                label,
                start,
                end,
            } => write!(
                f,
                "Invalid interval in record {} ({}): start {} is after end {}",
                record, label, start, end
            ),
            PipelineError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            PipelineError::Input(msg) => write!(f, "Input error: {}", msg),
            PipelineError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

// Conversions from other error types

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Input(format!("JSON error: {}", err))
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Output(format!("CSV error: {}", err))
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Output(format!("I/O error: {}", err))
    }
}

impl PipelineError {
    /// Wraps a date parse failure with the record and field it came from.
    pub fn malformed_date(record: usize, field: &'static str, err: DateParseError) -> Self {
        PipelineError::MalformedDate {
            record,
            field,
            value: err.input,
        }
    }
}
