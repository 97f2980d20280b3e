//! Table input: a file on disk or an in-memory buffer.

use std::fmt;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use crate::error::{Result, TableError};

/// Where a table is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableInput {
    /// File on disk; the extension may decide the format
    Path(PathBuf),
    /// In-memory buffer; always needs a format override
    Bytes(Vec<u8>),
}

impl TableInput {
    /// In-memory input from raw bytes
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        TableInput::Bytes(bytes.into())
    }

    /// In-memory input from text
    pub fn text(text: impl Into<String>) -> Self {
        TableInput::Bytes(text.into().into_bytes())
    }

    /// Path of a file input
    pub fn path(&self) -> Option<&Path> {
        match self {
            TableInput::Path(path) => Some(path),
            TableInput::Bytes(_) => None,
        }
    }

    /// Open the input as a byte stream
    pub fn into_read(self) -> Result<Box<dyn Read>> {
        match self {
            TableInput::Path(path) => Ok(Box::new(open_file(&path)?)),
            TableInput::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes))),
        }
    }
}

/// Open a file, reporting a missing file as [`TableError::FileNotFound`]
pub(crate) fn open_file(path: &Path) -> Result<File> {
    if !path.exists() {
        return Err(TableError::FileNotFound(path.display().to_string()));
    }
    Ok(File::open(path)?)
}

impl fmt::Display for TableInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableInput::Path(path) => write!(f, "{}", path.display()),
            TableInput::Bytes(bytes) => write!(f, "<{} bytes in memory>", bytes.len()),
        }
    }
}

impl From<PathBuf> for TableInput {
    fn from(path: PathBuf) -> Self {
        TableInput::Path(path)
    }
}

impl From<&Path> for TableInput {
    fn from(path: &Path) -> Self {
        TableInput::Path(path.to_path_buf())
    }
}

impl From<&PathBuf> for TableInput {
    fn from(path: &PathBuf) -> Self {
        TableInput::Path(path.clone())
    }
}

impl From<&str> for TableInput {
    fn from(path: &str) -> Self {
        TableInput::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for TableInput {
    fn from(bytes: Vec<u8>) -> Self {
        TableInput::Bytes(bytes)
    }
}
