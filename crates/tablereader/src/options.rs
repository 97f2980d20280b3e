//! Reader options.
//!
//! Options can be built in code or parsed from TOML:
//!
//! ```toml
//! sheet = "Artikel"
//! fieldnames = ["Name", "Artikelnummer", "Preis"]
//! strip_whitespace = true
//! format = "xlsx"
//! delimiter = ","
//! quotechar = "'"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::sources::CsvOptions;

/// Construction options for [`TableReader`](crate::TableReader)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Sheet to read; the first sheet when unset. Ignored for delimited text
    pub sheet: Option<String>,
    /// Column names in fixed order; the first row is used when unset or empty
    pub fieldnames: Option<Vec<String>>,
    /// Trim leading and trailing whitespace of every value
    pub strip_whitespace: bool,
    /// Format tag overriding the file extension (`csv`, `unicodecsv`, `xls`, `xlsx`)
    pub format: Option<String>,
    /// Field delimiter for delimited text
    pub delimiter: char,
    /// Quote character for delimited text
    pub quotechar: char,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            fieldnames: None,
            strip_whitespace: false,
            format: None,
            delimiter: ';',
            quotechar: '"',
        }
    }
}

impl ReaderOptions {
    /// Defaults: semicolon delimiter, double-quote, first row as header
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-separated values
    pub fn comma() -> Self {
        Self {
            delimiter: ',',
            ..Default::default()
        }
    }

    /// Tab-separated values
    pub fn tsv() -> Self {
        Self {
            delimiter: '\t',
            ..Default::default()
        }
    }

    /// Parse options from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Sheet to read instead of the first one
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Explicit field names; the first row is then read as data
    pub fn with_fieldnames<I, S>(mut self, fieldnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fieldnames = Some(fieldnames.into_iter().map(Into::into).collect());
        self
    }

    /// Trim leading and trailing whitespace from every value
    pub fn strip_whitespace(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }

    /// Format tag overriding the file extension
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Field delimiter for delimited text
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Quote character for delimited text
    pub fn with_quotechar(mut self, quotechar: char) -> Self {
        self.quotechar = quotechar;
        self
    }

    /// Tokenizer options; delimiter and quote must be single ASCII characters
    pub fn csv_options(&self) -> Result<CsvOptions> {
        Ok(CsvOptions {
            delimiter: ascii_byte("delimiter", self.delimiter)?,
            quote: ascii_byte("quotechar", self.quotechar)?,
        })
    }

    /// Explicit field names, treating an empty list as absent
    pub(crate) fn explicit_fieldnames(&self) -> Option<&[String]> {
        self.fieldnames.as_deref().filter(|names| !names.is_empty())
    }
}

fn ascii_byte(option: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(TableError::InvalidOption(format!(
            "{} must be an ASCII character, got {:?}",
            option, c
        )))
    }
}
