//! Forward-only rows over the cell stream of one zip worksheet.
//!
//! The worksheet XML is pulled one cell at a time through calamine's cell
//! reader, which borrows the workbook it reads from. [`CellStream`] keeps the
//! workbook and that borrow together so rows can be produced on demand.

use std::io::{Read, Seek};

use calamine::{Data, Xlsx, XlsxError};
use ouroboros::self_referencing;
use tracing::warn;

use crate::cell::cell_to_string;
use crate::error::Result;
use crate::sources::Row;

/// Seekable bytes behind a zip workbook
pub(crate) trait WorkbookStream: Read + Seek {}

impl<T: Read + Seek> WorkbookStream for T {}

pub(crate) type BoxedStream = Box<dyn WorkbookStream>;

/// Row, column and string value of a non-empty cell
type StreamedCell = (u32, u32, String);

type CellResult = std::result::Result<Option<StreamedCell>, XlsxError>;

type NextCell<'a> = Box<dyn FnMut() -> CellResult + 'a>;

#[self_referencing]
struct CellStream {
    workbook: Xlsx<BoxedStream>,
    #[borrows(mut workbook)]
    #[not_covariant]
    next_cell: NextCell<'this>,
}

fn no_cells() -> CellResult {
    Ok(None)
}

/// Rows of one worksheet, assembled lazily from its cell stream
///
/// Cells arrive in document order. A row ends when a cell of a later row
/// shows up; that cell is held back for the next call. Row indices without
/// any cell come out as blank rows, so row `n` of the output is always row
/// `n` of the sheet. Rows are padded to the widest row seen so far.
pub(crate) struct XlsxRows {
    cells: CellStream,
    pending: Option<StreamedCell>,
    exhausted: bool,
    next_row: u32,
    width: usize,
}

impl XlsxRows {
    /// Start streaming `sheet`; the name must exist in the workbook
    pub(crate) fn open(workbook: Xlsx<BoxedStream>, sheet: &str) -> Result<Self> {
        let cells = CellStream::try_new(workbook, |workbook| {
            match workbook.worksheet_cells_reader(sheet) {
                Ok(mut reader) => {
                    let next: NextCell<'_> = Box::new(move || loop {
                        let cell = match reader.next_cell() {
                            Ok(Some(cell)) => cell,
                            Ok(None) => return Ok(None),
                            Err(e) => return Err(e),
                        };
                        let value = Data::from(cell.get_value().clone());
                        if value == Data::Empty {
                            continue;
                        }
                        let (row, col) = cell.get_position();
                        return Ok(Some((row, col, cell_to_string(&value))));
                    });
                    Ok(next)
                }
                Err(XlsxError::NotAWorksheet(typ)) => {
                    warn!(sheet, kind = %typ, "sheet is not a worksheet, reading it as empty");
                    let next: NextCell<'_> = Box::new(no_cells);
                    Ok(next)
                }
                Err(e) => Err(e),
            }
        })?;

        Ok(Self {
            cells,
            pending: None,
            exhausted: false,
            next_row: 0,
            width: 0,
        })
    }

    /// Assemble the next row, `Ok(None)` after the last cell
    pub(crate) fn next_row(&mut self) -> Result<Option<Row>> {
        let Some((row_idx, col, value)) = self.next_cell()? else {
            return Ok(None);
        };

        let current = self.next_row;
        self.next_row += 1;

        let mut row = vec![String::new(); self.width];
        if row_idx > current {
            self.pending = Some((row_idx, col, value));
            return Ok(Some(row));
        }

        place(&mut row, col, value);
        loop {
            match self.next_cell()? {
                Some((r, c, v)) if r <= current => place(&mut row, c, v),
                Some(cell) => {
                    self.pending = Some(cell);
                    break;
                }
                None => break,
            }
        }

        self.width = self.width.max(row.len());
        Ok(Some(row))
    }

    fn next_cell(&mut self) -> Result<Option<StreamedCell>> {
        if let Some(cell) = self.pending.take() {
            return Ok(Some(cell));
        }
        if self.exhausted {
            return Ok(None);
        }

        let cell = self.cells.with_next_cell_mut(|next| next())?;
        if cell.is_none() {
            self.exhausted = true;
        }
        Ok(cell)
    }
}

fn place(row: &mut Row, col: u32, value: String) {
    let col = col as usize;
    if col >= row.len() {
        row.resize(col + 1, String::new());
    }
    row[col] = value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_grows_row() {
        let mut row = vec![String::new(); 1];
        place(&mut row, 2, "c".to_string());
        assert_eq!(row, vec!["", "", "c"]);

        place(&mut row, 0, "a".to_string());
        assert_eq!(row, vec!["a", "", "c"]);
    }
}
