//! # tablereader
//!
//! Unified row iteration over tabular data in delimited text (CSV), legacy
//! binary workbooks (XLS) and zip-based workbooks (XLSX, XLSM, XLTX, XLTM).
//! Every row comes out as a [`Record`], an ordered mapping from column name
//! to string value, whatever the storage format.
//!
//! ## Features
//!
//! - **Format dispatch**: by file extension or an explicit format tag
//! - **Header binding**: explicit field names, the first row, or a row found
//!   by marker value ([`OffsetTableReader`])
//! - **Stringification**: numbers, dates and booleans become strings with one
//!   policy for every workbook format
//! - **Whitespace stripping**: optional trimming of every value
//!
//! ## Example
//!
//! ```rust,ignore
//! use tablereader::{ReaderOptions, TableReader};
//!
//! let options = ReaderOptions::comma().strip_whitespace(true);
//! let mut reader = TableReader::open("artikel.csv", options)?;
//!
//! println!("columns: {:?}", reader.fieldnames()?);
//! for record in reader {
//!     let record = record?;
//!     println!("{} costs {}", record.get("Name").unwrap_or(""), record.get("Preis").unwrap_or(""));
//! }
//! ```

pub mod cell;
pub mod error;
pub mod format;
pub mod input;
pub mod offset;
pub mod options;
pub mod reader;
pub mod record;
pub mod sources;

// Re-exports
pub use cell::cell_to_string;
pub use error::{Result, TableError};
pub use format::TableFormat;
pub use input::TableInput;
pub use offset::OffsetTableReader;
pub use options::ReaderOptions;
pub use reader::TableReader;
pub use record::Record;
pub use sources::{Row, RowSource, Source, Stripping};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
