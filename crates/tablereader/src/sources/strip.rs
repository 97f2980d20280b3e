//! Whitespace-stripping decorator for row sources.

use crate::error::Result;
use crate::sources::{Row, RowSource};

/// Wraps a row source and trims every cell it produces
#[derive(Debug)]
pub struct Stripping<S> {
    inner: S,
}

impl<S: RowSource> Stripping<S> {
    /// Wrap `inner`
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Wrapped source
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Unwrap the source
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RowSource> RowSource for Stripping<S> {
    fn next_row(&mut self) -> Result<Option<Row>> {
        Ok(self.inner.next_row()?.map(|mut row| {
            row.iter_mut().for_each(trim_in_place);
            row
        }))
    }

    fn line_num(&self) -> usize {
        self.inner.line_num()
    }

    fn sheet_names(&self) -> &[String] {
        self.inner.sheet_names()
    }
}

/// Trim leading and trailing whitespace, reallocating only when needed
pub(crate) fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
