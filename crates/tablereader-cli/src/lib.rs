//! tablereader CLI - Command-line interface library
//!
//! This library provides the CLI functionality for tablereader, including:
//! - Read: Print the records of a csv, xls or xlsx table
//! - Sheets: List the sheets of a workbook
//!
//! # Library Usage
//!
//! ```ignore
//! use tablereader_cli::{read_command, ReadArgs};
//!
//! let args = ReadArgs { input: "artikel.xlsx".into(), ..Default::default() };
//! let count = read_command(&args, &mut std::io::stdout())?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Records as JSON lines
//! tablereader read artikel.xlsx --sheet Tabelle1
//!
//! # Comma-separated input with single quotes, trimmed, as text
//! tablereader read artikel.csv --delimiter , --quotechar "'" --strip --output text
//!
//! # Header somewhere below a report title
//! tablereader read bericht.xls --header-marker Artikel
//!
//! # Sheet names
//! tablereader sheets artikel.xlsx
//! ```

pub mod app;

// Re-export main entry point and types
pub use app::{read_command, sheets_command};
pub use app::{run_cli, OutputFormat, ReadArgs};
