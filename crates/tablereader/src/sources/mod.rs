//! Row sources.
//!
//! Every supported storage format is adapted to [`RowSource`], a forward-only
//! producer of string-cell rows. [`Source`] is the closed set of variants a
//! [`TableReader`](crate::TableReader) dispatches to.

pub mod core_csv;
pub mod csv;
pub mod sheet;
pub mod strip;
mod xlsx_stream;

pub use self::core_csv::CoreCsvSource;
pub use self::csv::{CsvOptions, CsvSource};
pub use self::sheet::{SheetKind, SheetSource};
pub use self::strip::Stripping;

use std::io::Read;

use tracing::debug;

use crate::error::Result;
use crate::format::TableFormat;
use crate::input::TableInput;

/// One record of string cells, in column order
pub type Row = Vec<String>;

/// Trait for forward-only producers of string-cell rows
pub trait RowSource {
    /// Fetch the next row, `Ok(None)` once the data is exhausted
    fn next_row(&mut self) -> Result<Option<Row>>;

    /// Number of rows produced so far
    fn line_num(&self) -> usize;

    /// Sheet names of the underlying workbook (empty for delimited text)
    fn sheet_names(&self) -> &[String] {
        &[]
    }
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn next_row(&mut self) -> Result<Option<Row>> {
        (**self).next_row()
    }

    fn line_num(&self) -> usize {
        (**self).line_num()
    }

    fn sheet_names(&self) -> &[String] {
        (**self).sheet_names()
    }
}

/// Row source selected for a table
pub enum Source {
    /// Delimited text through the `csv` reader
    Csv(CsvSource<Box<dyn Read>>),
    /// Delimited text through the `csv-core` tokenizer
    CoreCsv(CoreCsvSource<Box<dyn Read>>),
    /// One sheet of an xls or xlsx workbook
    Sheet(SheetSource),
    /// Any source with whitespace stripping applied per cell
    Stripped(Box<Stripping<Source>>),
}

impl Source {
    /// Open the row source for an already resolved format
    pub fn open(
        format: TableFormat,
        input: TableInput,
        sheet: Option<&str>,
        csv_options: &CsvOptions,
    ) -> Result<Self> {
        debug!(%format, input = %input, "opening row source");

        let source = match format {
            TableFormat::Csv => Source::Csv(CsvSource::from_reader(input.into_read()?, csv_options)),
            TableFormat::CsvCore => {
                Source::CoreCsv(CoreCsvSource::from_reader(input.into_read()?, csv_options))
            }
            TableFormat::Xls => Source::Sheet(SheetSource::open(SheetKind::Xls, input, sheet)?),
            TableFormat::Xlsx => Source::Sheet(SheetSource::open(SheetKind::Xlsx, input, sheet)?),
        };

        Ok(source)
    }

    /// Wrap this source so that every cell is trimmed
    pub fn stripped(self) -> Self {
        Source::Stripped(Box::new(Stripping::new(self)))
    }

    /// Name of the selected sheet, if the source has sheets
    pub fn sheet_name(&self) -> Option<&str> {
        match self {
            Source::Sheet(sheet) => Some(sheet.sheet_name()),
            Source::Stripped(inner) => inner.get_ref().sheet_name(),
            Source::Csv(_) | Source::CoreCsv(_) => None,
        }
    }
}

impl RowSource for Source {
    fn next_row(&mut self) -> Result<Option<Row>> {
        match self {
            Source::Csv(s) => s.next_row(),
            Source::CoreCsv(s) => s.next_row(),
            Source::Sheet(s) => s.next_row(),
            Source::Stripped(s) => s.next_row(),
        }
    }

    fn line_num(&self) -> usize {
        match self {
            Source::Csv(s) => s.line_num(),
            Source::CoreCsv(s) => s.line_num(),
            Source::Sheet(s) => s.line_num(),
            Source::Stripped(s) => s.line_num(),
        }
    }

    fn sheet_names(&self) -> &[String] {
        match self {
            Source::Csv(s) => s.sheet_names(),
            Source::CoreCsv(s) => s.sheet_names(),
            Source::Sheet(s) => s.sheet_names(),
            Source::Stripped(s) => s.sheet_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_text(format: TableFormat, text: &str) -> Source {
        Source::open(format, TableInput::text(text), None, &CsvOptions::comma()).unwrap()
    }

    #[test]
    fn test_both_csv_engines_agree() {
        let text = "a,'b,c',d\n1,2,3\n";
        let options = CsvOptions::comma().with_quote(b'\'');

        let mut primary =
            Source::open(TableFormat::Csv, TableInput::text(text), None, &options).unwrap();
        let mut alternate =
            Source::open(TableFormat::CsvCore, TableInput::text(text), None, &options).unwrap();

        loop {
            let a = primary.next_row().unwrap();
            let b = alternate.next_row().unwrap();
            assert_eq!(a, b);
            if a.is_none() {
                break;
            }
        }
        assert_eq!(primary.line_num(), 2);
        assert_eq!(alternate.line_num(), 2);
    }

    #[test]
    fn test_stripped_source_forwards() {
        let mut source = open_text(TableFormat::Csv, " a , b \n").stripped();
        assert_eq!(
            source.next_row().unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(source.line_num(), 1);
        assert!(source.sheet_names().is_empty());
        assert_eq!(source.sheet_name(), None);
    }

    #[test]
    fn test_spreadsheet_from_garbage_bytes_fails() {
        let result = Source::open(
            TableFormat::Xlsx,
            TableInput::bytes(b"not a workbook".to_vec()),
            None,
            &CsvOptions::default(),
        );
        assert!(result.is_err());
    }
}
