//! Pipeline error type.
//!
//! Every stage returns `Result<T, PipelineError>` so callers are forced to
//! handle a halted stage instead of receiving a partially processed table.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file does not exist.
    #[error("dataset not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Malformed CSV input.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A date label did not match the expected `M/D/YY` format.
    #[error("invalid date: {value:?}")]
    DateParse { value: String },

    /// A cleaning invariant could not be established.
    #[error("cleaning failed on column {column:?}: {message}")]
    Cleaning { column: String, message: String },

    /// Input had the wrong shape for the requested operation.
    #[error("schema mismatch: {message}")]
    Schema { message: String },

    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Shorthand for a [`PipelineError::Schema`] with a formatted message.
    pub fn schema(message: impl Into<String>) -> Self {
        PipelineError::Schema {
            message: message.into(),
        }
    }

    /// Shorthand for a [`PipelineError::Cleaning`] naming the failing column.
    pub fn cleaning(column: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Cleaning {
            column: column.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
