//! Table format tags and resolution from overrides or file extensions.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Result, TableError};

/// Extensions handled by the zip-based spreadsheet decoder
const XLSX_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xltx", "xltm"];

/// Storage format of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    /// Delimited text read by the `csv` crate
    Csv,
    /// Delimited text read by the lower-level `csv-core` tokenizer
    CsvCore,
    /// Legacy binary workbook
    Xls,
    /// Zip-based workbook (xlsx, xlsm, xltx, xltm)
    Xlsx,
}

impl TableFormat {
    /// Canonical tag of this format
    pub fn tag(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::CsvCore => "unicodecsv",
            TableFormat::Xls => "xls",
            TableFormat::Xlsx => "xlsx",
        }
    }

    /// Whether rows come from a delimited-text tokenizer
    pub fn is_delimited(self) -> bool {
        matches!(self, TableFormat::Csv | TableFormat::CsvCore)
    }

    /// Whether the format has a sheet concept
    pub fn is_spreadsheet(self) -> bool {
        !self.is_delimited()
    }

    /// Infer the format from a file extension, ignoring ASCII case.
    ///
    /// The alternate delimited-text engine is never inferred; it has to be
    /// requested explicitly.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();

        match ext.as_str() {
            "csv" => Some(TableFormat::Csv),
            "xls" => Some(TableFormat::Xls),
            e if XLSX_EXTENSIONS.contains(&e) => Some(TableFormat::Xlsx),
            _ => None,
        }
    }

    /// Resolve the format for a reader.
    ///
    /// An override always wins over the extension. Without an override the
    /// path extension decides; in-memory sources (no path) must carry one.
    pub fn resolve(format_override: Option<&str>, path: Option<&Path>) -> Result<Self> {
        if let Some(tag) = format_override {
            return tag.parse();
        }

        let path = path.ok_or(TableError::AmbiguousSource)?;
        Self::from_path(path).ok_or_else(|| {
            TableError::UnsupportedFormat(format!(
                "unsupported file extension and no format given: {}",
                path.display()
            ))
        })
    }
}

impl FromStr for TableFormat {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(TableFormat::Csv),
            "unicodecsv" | "csv-core" => Ok(TableFormat::CsvCore),
            "xls" => Ok(TableFormat::Xls),
            "xlsx" => Ok(TableFormat::Xlsx),
            other => Err(TableError::UnsupportedFormat(format!(
                "unknown format tag '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
