//! Error types for table reading.

use thiserror::Error;

/// Result type for table operations
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors that can occur while opening or reading a table
#[derive(Debug, Error)]
pub enum TableError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Requested sheet is not part of the workbook
    #[error("No such sheet: {0}")]
    InvalidSheet(String),

    /// Neither the format override nor the file extension names a known format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// In-memory input given without a format override
    #[error("In-memory source given without a format override, cannot guess the format")]
    AmbiguousSource,

    /// Offset scan finished without finding the header marker
    #[error("Header marker not found: {0:?}")]
    UnboundHeader(String),

    /// Invalid reader option (delimiter, quote character)
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text tokenizer error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Field bytes are not valid UTF-8
    #[error("Invalid UTF-8 in field: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Spreadsheet decoder error
    #[error("Workbook error: {0}")]
    Workbook(String),
}

impl From<calamine::Error> for TableError {
    fn from(err: calamine::Error) -> Self {
        TableError::Workbook(err.to_string())
    }
}

impl From<calamine::XlsError> for TableError {
    fn from(err: calamine::XlsError) -> Self {
        TableError::Workbook(err.to_string())
    }
}

impl From<calamine::XlsxError> for TableError {
    fn from(err: calamine::XlsxError) -> Self {
        TableError::Workbook(err.to_string())
    }
}
