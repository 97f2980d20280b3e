//! Unified table reader over csv, xls and xlsx.

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, TableError};
use crate::format::TableFormat;
use crate::input::TableInput;
use crate::options::ReaderOptions;
use crate::record::{Fields, Record};
use crate::sources::sheet::{list_sheets, SheetKind};
use crate::sources::{Row, RowSource, Source};

/// Header binding state
#[derive(Debug)]
enum Header {
    /// Read from the first row when first needed
    Pending,
    Bound(Fields),
    /// Offset scan did not find its marker
    Unbound { marker: String, reported: bool },
}

/// Reads csv, xls and xlsx tables as a sequence of [`Record`]s.
///
/// The row source is chosen once from the format override or the file
/// extension. Field names come from the options or from the first row.
///
/// ```rust,ignore
/// use tablereader::{ReaderOptions, TableReader};
///
/// let reader = TableReader::open("artikel.xlsx", ReaderOptions::default())?;
/// for record in reader {
///     let record = record?;
///     println!("{:?}", record.get("Artikelnummer"));
/// }
/// ```
pub struct TableReader {
    source: Option<Source>,
    format: TableFormat,
    header: Header,
    /// Values still need trimming after binding (spreadsheet sources)
    strip_values: bool,
    sheets: Vec<String>,
    sheet: Option<String>,
    line_num: usize,
    header_line: Option<usize>,
}

impl TableReader {
    /// Open a table with default options
    pub fn new(input: impl Into<TableInput>) -> Result<Self> {
        Self::open(input, ReaderOptions::default())
    }

    /// Open a table.
    ///
    /// Fails immediately on an unknown format, an in-memory input without a
    /// format override, a missing sheet or an unreadable file.
    pub fn open(input: impl Into<TableInput>, options: ReaderOptions) -> Result<Self> {
        let input = input.into();
        let format = TableFormat::resolve(options.format.as_deref(), input.path())?;
        let csv_options = options.csv_options()?;

        let mut source = Source::open(format, input, options.sheet.as_deref(), &csv_options)?;

        // Delimited text is trimmed per cell by the decorator, spreadsheets
        // per value once the record is built
        let mut strip_values = options.strip_whitespace;
        if options.strip_whitespace && format.is_delimited() {
            source = source.stripped();
            strip_values = false;
        }

        let header = match options.explicit_fieldnames() {
            Some(names) => Header::Bound(Fields::new(names.to_vec())),
            None => Header::Pending,
        };

        Ok(Self {
            sheets: source.sheet_names().to_vec(),
            sheet: source.sheet_name().map(str::to_string),
            source: Some(source),
            format,
            header,
            strip_values,
            line_num: 0,
            header_line: None,
        })
    }

    /// List the sheets of a workbook, format taken from the extension
    pub fn sheet_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
        let path = path.as_ref();
        let format = TableFormat::from_path(path)
            .filter(|f| f.is_spreadsheet())
            .ok_or_else(|| {
                TableError::UnsupportedFormat(format!(
                    "not a workbook extension: {}",
                    path.display()
                ))
            })?;
        Self::sheet_names_as(path, format)
    }

    /// List the sheets of a workbook in an explicit format
    pub fn sheet_names_as(path: impl AsRef<Path>, format: TableFormat) -> Result<Vec<String>> {
        let kind = match format {
            TableFormat::Xls => SheetKind::Xls,
            TableFormat::Xlsx => SheetKind::Xlsx,
            TableFormat::Csv | TableFormat::CsvCore => {
                return Err(TableError::UnsupportedFormat(format!(
                    "{} has no sheets",
                    format
                )))
            }
        };
        list_sheets(kind, path.as_ref())
    }

    /// Number of source rows consumed so far, header rows included
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Resolved storage format
    pub fn format(&self) -> TableFormat {
        self.format
    }

    /// Sheet names of the workbook (empty for delimited text)
    pub fn sheets(&self) -> &[String] {
        &self.sheets
    }

    /// Name of the selected sheet
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    /// Row number (1-based) the header was read from, if it came from the data
    pub fn header_line(&self) -> Option<usize> {
        self.header_line
    }

    /// Bound field names.
    ///
    /// Reads the first row as header if names were not given. Returns `None`
    /// for an empty table or when an offset scan found no header.
    pub fn fieldnames(&mut self) -> Result<Option<&[String]>> {
        self.bind_pending_header()?;
        match &self.header {
            Header::Bound(fields) => Ok(Some(fields.names())),
            Header::Pending | Header::Unbound { .. } => Ok(None),
        }
    }

    /// Release the underlying source. Later reads yield nothing
    pub fn close(&mut self) {
        if self.source.take().is_some() {
            debug!(format = %self.format, line_num = self.line_num, "closed table source");
        }
    }

    /// Read the next record, `Ok(None)` at the end of the table
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        if let Header::Unbound { marker, reported } = &mut self.header {
            if *reported {
                return Ok(None);
            }
            *reported = true;
            let marker = marker.clone();
            self.close();
            return Err(TableError::UnboundHeader(marker));
        }

        self.bind_pending_header()?;

        while let Some(row) = self.fetch_row()? {
            if row.is_empty() {
                continue;
            }
            if let Header::Bound(fields) = &self.header {
                return Ok(Some(Record::from_row(fields, row, self.strip_values)));
            }
        }

        Ok(None)
    }

    /// Scan rows for the first one containing a cell equal to `marker` and
    /// bind it as header. Returns whether the marker was found.
    pub(crate) fn scan_for_header(&mut self, marker: &str) -> Result<bool> {
        while let Some(row) = self.fetch_row()? {
            if row.iter().any(|cell| cell == marker) {
                debug!(marker, line = self.line_num, "found header row");
                self.header = Header::Bound(Fields::new(row));
                self.header_line = Some(self.line_num);
                return Ok(true);
            }
        }

        warn!(marker, rows = self.line_num, "header marker not found");
        self.header = Header::Unbound {
            marker: marker.to_string(),
            reported: false,
        };
        Ok(false)
    }

    fn bind_pending_header(&mut self) -> Result<()> {
        if let Header::Pending = self.header {
            while let Some(row) = self.fetch_row()? {
                if row.is_empty() {
                    continue;
                }
                debug!(columns = row.len(), "bound header from first row");
                self.header = Header::Bound(Fields::new(row));
                self.header_line = Some(self.line_num);
                break;
            }
        }
        Ok(())
    }

    /// Pull one row; the source is released once it is exhausted
    fn fetch_row(&mut self) -> Result<Option<Row>> {
        let Some(source) = self.source.as_mut() else {
            return Ok(None);
        };

        let row = source.next_row()?;
        self.line_num = source.line_num();

        if row.is_none() {
            self.close();
        }
        Ok(row)
    }
}

impl Iterator for TableReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
