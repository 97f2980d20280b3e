//! Spreadsheet row source using calamine.

use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Range, Reader, Xls, Xlsx};
use tracing::debug;

use crate::cell::cell_to_string;
use crate::error::{Result, TableError};
use crate::input::{open_file, TableInput};
use crate::sources::xlsx_stream::{BoxedStream, XlsxRows};
use crate::sources::{Row, RowSource};

/// Workbook container type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// Legacy binary workbook (.xls)
    Xls,
    /// Zip-based workbook (.xlsx and relatives)
    Xlsx,
}

impl fmt::Display for SheetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetKind::Xls => f.write_str("xls"),
            SheetKind::Xlsx => f.write_str("xlsx"),
        }
    }
}

/// Where the rows of a sheet come from
enum SheetRows {
    /// Binary workbooks are decoded whole by calamine; walked by row index
    Grid { range: Range<Data>, next_row: u32 },
    /// Zip workbooks are streamed cell by cell
    Stream(XlsxRows),
}

/// One worksheet exposed as a row source
///
/// Rows start at the first row of the sheet and column A. Cells without a
/// value come out as empty strings. Binary workbooks pad every row to the
/// last used column; zip workbooks are read forward-only from the worksheet
/// XML and pad rows to the widest row read so far.
pub struct SheetSource {
    kind: SheetKind,
    sheet_names: Vec<String>,
    sheet: String,
    rows: SheetRows,
    line_num: usize,
}

impl SheetSource {
    /// Open a workbook and select a sheet.
    ///
    /// Without a sheet name the first sheet is used. A named sheet must exist
    /// in the workbook.
    pub fn open(kind: SheetKind, input: TableInput, sheet: Option<&str>) -> Result<Self> {
        match kind {
            SheetKind::Xls => match input {
                TableInput::Path(path) => {
                    let workbook: Xls<_> = open_workbook_from_rs(open_file(&path)?)?;
                    Self::decoded(workbook, sheet)
                }
                TableInput::Bytes(bytes) => {
                    let workbook: Xls<_> = open_workbook_from_rs(Cursor::new(bytes))?;
                    Self::decoded(workbook, sheet)
                }
            },
            SheetKind::Xlsx => {
                let stream: BoxedStream = match input {
                    TableInput::Path(path) => Box::new(open_file(&path)?),
                    TableInput::Bytes(bytes) => Box::new(Cursor::new(bytes)),
                };
                let workbook: Xlsx<BoxedStream> = open_workbook_from_rs(stream)?;
                Self::streamed(workbook, sheet)
            }
        }
    }

    /// Select a sheet of a binary workbook and decode its cells
    fn decoded<W, RS>(mut workbook: W, sheet: Option<&str>) -> Result<Self>
    where
        W: Reader<RS>,
        RS: Read + Seek,
        TableError: From<W::Error>,
    {
        let sheet_names = workbook.sheet_names().to_vec();
        let sheet = select_sheet(&sheet_names, sheet)?;

        let range = workbook.worksheet_range(&sheet)?;
        debug!(kind = %SheetKind::Xls, sheet = %sheet, end = ?range.end(), "selected worksheet");

        Ok(Self::from_range(SheetKind::Xls, sheet_names, sheet, range))
    }

    /// Select a sheet of a zip workbook and start streaming it
    fn streamed(workbook: Xlsx<BoxedStream>, sheet: Option<&str>) -> Result<Self> {
        let sheet_names = workbook.sheet_names().to_vec();
        let sheet = select_sheet(&sheet_names, sheet)?;

        let rows = XlsxRows::open(workbook, &sheet)?;
        debug!(kind = %SheetKind::Xlsx, sheet = %sheet, "streaming worksheet");

        Ok(Self {
            kind: SheetKind::Xlsx,
            sheet_names,
            sheet,
            rows: SheetRows::Stream(rows),
            line_num: 0,
        })
    }

    /// Build a source over an already decoded sheet
    pub(crate) fn from_range(
        kind: SheetKind,
        sheet_names: Vec<String>,
        sheet: String,
        range: Range<Data>,
    ) -> Self {
        Self {
            kind,
            sheet_names,
            sheet,
            rows: SheetRows::Grid { range, next_row: 0 },
            line_num: 0,
        }
    }

    /// Workbook container type
    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    /// Name of the selected sheet
    pub fn sheet_name(&self) -> &str {
        &self.sheet
    }
}

/// First sheet when no name is given, otherwise the exact name
fn select_sheet(sheet_names: &[String], sheet: Option<&str>) -> Result<String> {
    match sheet {
        Some(name) if sheet_names.iter().any(|n| n == name) => Ok(name.to_string()),
        Some(name) => Err(TableError::InvalidSheet(name.to_string())),
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| TableError::InvalidSheet("workbook has no sheets".to_string())),
    }
}

fn grid_row(range: &Range<Data>, next_row: &mut u32) -> Option<Row> {
    let (last_row, last_col) = range.end()?;
    if *next_row > last_row {
        return None;
    }

    let row_idx = *next_row;
    *next_row += 1;
    Some(
        (0..=last_col)
            .map(|col| {
                range
                    .get_value((row_idx, col))
                    .map(cell_to_string)
                    .unwrap_or_default()
            })
            .collect(),
    )
}

impl RowSource for SheetSource {
    fn next_row(&mut self) -> Result<Option<Row>> {
        let row = match &mut self.rows {
            SheetRows::Grid { range, next_row } => grid_row(range, next_row),
            SheetRows::Stream(rows) => rows.next_row()?,
        };
        if row.is_some() {
            self.line_num += 1;
        }
        Ok(row)
    }

    fn line_num(&self) -> usize {
        self.line_num
    }

    fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }
}

/// List the sheet names of a workbook file without selecting a sheet
pub fn list_sheets(kind: SheetKind, path: &Path) -> Result<Vec<String>> {
    let file = open_file(path)?;
    let names = match kind {
        SheetKind::Xls => {
            let workbook: Xls<_> = open_workbook_from_rs(file)?;
            workbook.sheet_names().to_vec()
        }
        SheetKind::Xlsx => {
            let workbook: Xlsx<_> = open_workbook_from_rs(file)?;
            workbook.sheet_names().to_vec()
        }
    };
    Ok(names)
}
