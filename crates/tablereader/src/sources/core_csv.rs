//! Alternate delimited-text row source driving the `csv-core` tokenizer.
//!
//! Produces the same rows as [`CsvSource`](super::CsvSource) for well-formed
//! input. It is kept for inputs where a plain byte-level tokenizer behaves
//! better than the record-oriented reader.

use std::io::{BufRead, BufReader, Read};

use csv_core::ReadRecordResult;

use crate::error::Result;
use crate::sources::{CsvOptions, Row, RowSource};

const INITIAL_OUTPUT: usize = 1024;
const INITIAL_ENDS: usize = 16;

/// Row source tokenizing delimited text with [`csv_core::Reader`]
pub struct CoreCsvSource<R> {
    input: BufReader<R>,
    core: csv_core::Reader,
    output: Vec<u8>,
    ends: Vec<usize>,
    line_num: usize,
    done: bool,
}

impl<R: Read> CoreCsvSource<R> {
    /// Create a source over any byte stream
    pub fn from_reader(rdr: R, options: &CsvOptions) -> Self {
        let core = csv_core::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .build();

        Self {
            input: BufReader::new(rdr),
            core,
            output: vec![0; INITIAL_OUTPUT],
            ends: vec![0; INITIAL_ENDS],
            line_num: 0,
            done: false,
        }
    }

    /// Split the tokenized record buffer into owned fields
    fn fields(&self, out_len: usize, ends_len: usize) -> Result<Row> {
        let data = &self.output[..out_len];
        let mut row = Vec::with_capacity(ends_len);
        let mut start = 0;

        for &end in &self.ends[..ends_len] {
            row.push(String::from_utf8(data[start..end].to_vec())?);
            start = end;
        }

        Ok(row)
    }
}

impl<R: Read> RowSource for CoreCsvSource<R> {
    fn next_row(&mut self) -> Result<Option<Row>> {
        if self.done {
            return Ok(None);
        }

        let mut out_len = 0;
        let mut ends_len = 0;

        loop {
            // An empty buffer signals end of input to the tokenizer
            let input = self.input.fill_buf()?;
            let (result, n_in, n_out, n_ends) = self.core.read_record(
                input,
                &mut self.output[out_len..],
                &mut self.ends[ends_len..],
            );
            self.input.consume(n_in);
            out_len += n_out;
            ends_len += n_ends;

            match result {
                ReadRecordResult::InputEmpty => {}
                ReadRecordResult::OutputFull => {
                    let len = self.output.len();
                    self.output.resize(len * 2, 0);
                }
                ReadRecordResult::OutputEndsFull => {
                    let len = self.ends.len();
                    self.ends.resize(len * 2, 0);
                }
                ReadRecordResult::Record => {
                    self.line_num += 1;
                    return self.fields(out_len, ends_len).map(Some);
                }
                ReadRecordResult::End => {
                    self.done = true;
                    return Ok(None);
                }
            }
        }
    }

    fn line_num(&self) -> usize {
        self.line_num
    }
}
