//! Delimited-text row source backed by the `csv` crate.

use std::io::Read;

use crate::error::Result;
use crate::sources::{Row, RowSource};

/// Options for delimited-text tokenizing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter (default: semicolon)
    pub delimiter: u8,
    /// Quote character (default: double quote)
    pub quote: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            quote: b'"',
        }
    }
}

impl CsvOptions {
    /// Comma-separated values
    pub fn comma() -> Self {
        Self {
            delimiter: b',',
            ..Default::default()
        }
    }

    /// Tab-separated values
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Replace the quote character
    pub fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }
}

/// Row source reading delimited text with [`csv::Reader`]
///
/// Headers are not interpreted here and records may have differing lengths;
/// field binding happens in the table reader.
pub struct CsvSource<R> {
    reader: csv::Reader<R>,
    record: csv::StringRecord,
    line_num: usize,
}

impl<R: Read> CsvSource<R> {
    /// Create a source over any byte stream
    pub fn from_reader(rdr: R, options: &CsvOptions) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(rdr);

        Self {
            reader,
            record: csv::StringRecord::new(),
            line_num: 0,
        }
    }
}

impl<R: Read> RowSource for CsvSource<R> {
    fn next_row(&mut self) -> Result<Option<Row>> {
        if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        self.line_num += 1;
        Ok(Some(self.record.iter().map(str::to_string).collect()))
    }

    fn line_num(&self) -> usize {
        self.line_num
    }
}
