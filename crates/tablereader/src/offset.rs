//! Table reader whose header row is located by a marker value.

use crate::error::Result;
use crate::format::TableFormat;
use crate::input::TableInput;
use crate::options::ReaderOptions;
use crate::reader::TableReader;
use crate::record::Record;

/// Reads tables whose header is not in the first row.
///
/// Without explicit field names, rows are scanned until one contains a cell
/// exactly equal to the marker. That whole row becomes the header and records
/// start with the row after it. If the marker never shows up, the first read
/// fails with [`TableError::UnboundHeader`](crate::TableError::UnboundHeader).
pub struct OffsetTableReader {
    inner: TableReader,
    marker: String,
}

impl OffsetTableReader {
    /// Open a table and scan for the row containing `marker`.
    ///
    /// Rows before the header are consumed during construction. Explicit
    /// field names in `options` skip the scan.
    pub fn open(
        input: impl Into<TableInput>,
        marker: impl Into<String>,
        options: ReaderOptions,
    ) -> Result<Self> {
        let marker = marker.into();
        let scan = options.explicit_fieldnames().is_none();

        let mut inner = TableReader::open(input, options)?;
        if scan {
            inner.scan_for_header(&marker)?;
        }

        Ok(Self { inner, marker })
    }

    /// Value identifying the header row
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Row number (1-based) of the matched header row
    pub fn header_line(&self) -> Option<usize> {
        self.inner.header_line()
    }

    /// Bound field names, `None` when the marker was not found
    pub fn fieldnames(&mut self) -> Result<Option<&[String]>> {
        self.inner.fieldnames()
    }

    /// Rows read so far, scanned rows included
    pub fn line_num(&self) -> usize {
        self.inner.line_num()
    }

    /// Resolved table format
    pub fn format(&self) -> TableFormat {
        self.inner.format()
    }

    /// Sheet names of the workbook (empty for delimited text)
    pub fn sheets(&self) -> &[String] {
        self.inner.sheets()
    }

    /// Release the underlying source
    pub fn close(&mut self) {
        self.inner.close()
    }

    /// Read the next record after the header
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        self.inner.next_record()
    }

    /// Underlying reader, positioned after the header
    pub fn into_inner(self) -> TableReader {
        self.inner
    }
}

impl Iterator for OffsetTableReader {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;

    const REPORT: &str = "\
Bestandsliste;;\n\
Stand: 2015-12-01;;\n\
Pos;Artikel;Menge\n\
1;Schraube;10\n\
2;Mutter;20\n";

    fn open(text: &str, marker: &str, options: ReaderOptions) -> OffsetTableReader {
        OffsetTableReader::open(TableInput::text(text), marker, options.with_format("csv")).unwrap()
    }

    #[test]
    fn test_marker_row_becomes_header() {
        let mut reader = open(REPORT, "Artikel", ReaderOptions::default());
        assert_eq!(reader.fieldnames().unwrap().unwrap(), ["Pos", "Artikel", "Menge"]);
        assert_eq!(reader.header_line(), Some(3));
        assert_eq!(reader.marker(), "Artikel");

        let records: Vec<Record> = reader.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("Artikel"), Some("Schraube"));
        assert_eq!(records[1].get("Menge"), Some("20"));
        assert_eq!(reader.line_num(), 5);
    }

    #[test]
    fn test_marker_matches_whole_cell_only() {
        let result: Vec<_> = open(REPORT, "Artik", ReaderOptions::default()).collect();
        assert_eq!(result.len(), 1);
        assert!(matches!(result[0], Err(TableError::UnboundHeader(_))));
    }

    #[test]
    fn test_missing_marker_fails_once() {
        let mut reader = open(REPORT, "Preis", ReaderOptions::default());
        assert!(reader.fieldnames().unwrap().is_none());
        assert!(matches!(
            reader.next_record(),
            Err(TableError::UnboundHeader(ref m)) if m == "Preis"
        ));
        assert!(reader.next_record().unwrap().is_none());
    }

    #[test]
    fn test_explicit_fieldnames_skip_scan() {
        let reader = open(
            REPORT,
            "Artikel",
            ReaderOptions::default().with_fieldnames(["a", "b", "c"]),
        );
        let records: Vec<Record> = reader.collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].get("a"), Some("Bestandsliste"));
    }

    #[test]
    fn test_empty_fieldnames_still_scan() {
        let mut reader = open(
            REPORT,
            "Pos",
            ReaderOptions::default().with_fieldnames(Vec::<String>::new()),
        );
        assert_eq!(reader.header_line(), Some(3));
        assert_eq!(reader.next().unwrap().unwrap().get("Pos"), Some("1"));
    }

    #[test]
    fn test_scan_sees_stripped_cells() {
        let text = "x;y\n  Pos ; Artikel \n1;Schraube\n";
        let mut reader = open(text, "Pos", ReaderOptions::default().strip_whitespace(true));
        assert_eq!(reader.fieldnames().unwrap().unwrap(), ["Pos", "Artikel"]);
    }
}
