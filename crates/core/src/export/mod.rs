//! CSV exports.
//!
//! Statements and the transfer log are written through the `csv` crate to any
//! [`std::io::Write`] sink. Spreadsheet users get a UTF-8 byte order mark by
//! default.

pub mod error;
pub mod writer;

pub use error::ExportError;
pub use writer::{
    TRANSFER_EXPORT_HEADERS, write_company_statement, write_driver_statement, write_transfers,
};

use dispatch_shared::{AppError, ExportConfig};

/// CSV formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Field delimiter.
    pub delimiter: u8,
    /// Write a UTF-8 byte order mark before the header.
    pub byte_order_mark: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            byte_order_mark: true,
        }
    }
}

impl ExportOptions {
    /// Builds options from the `export` config section.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the delimiter is not a single ASCII character.
    pub fn from_config(config: &ExportConfig) -> Result<Self, AppError> {
        Ok(Self {
            delimiter: config.delimiter_byte()?,
            byte_order_mark: config.byte_order_mark,
        })
    }

    /// Same options without the byte order mark.
    #[must_use]
    pub const fn without_bom(mut self) -> Self {
        self.byte_order_mark = false;
        self
    }
}
