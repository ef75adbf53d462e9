//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Role is not allowed to perform the operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Referenced record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Writing an export failed.
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Forbidden(_) => 3,
            Self::NotFound(_) => 4,
            Self::Validation(_) => 2,
            Self::Configuration(_) => 78,
            Self::Export(_) => 74,
        }
    }

    /// Returns the stable error code used in machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Export(_) => "EXPORT_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        Self::Configuration(value.to_string())
    }
}
