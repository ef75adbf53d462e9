//! Export error types.

use dispatch_shared::AppError;
use thiserror::Error;

/// Errors raised while writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to export.
    #[error("No data to export")]
    Empty,

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing to the sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        match value {
            ExportError::Empty => Self::NotFound(value.to_string()),
            ExportError::Csv(_) | ExportError::Io(_) => Self::Export(value.to_string()),
        }
    }
}
