//! Streaming CSV reader with iterator interface
//!
//! Yields one [`SourceRecord`] per data row, keyed by the file's header row.
//!
//! # Design
//!
//! The reader wraps `csv::Reader` and reads rows one at a time, so memory use
//! stays constant regardless of file size. Formats differ in delimiter and in
//! the number of preamble lines written before the header (Coinbase puts a
//! short report title there); both are configured at construction. Preamble
//! lines are consumed from a `BufReader` before the CSV reader sees the
//! stream, so the header row is always the first CSV record.
//!
//! Rows are read with `flexible(true)`: exports regularly have trailing
//! columns missing on some lines, and the parsers decide which columns they
//! require.
//!
//! # Error Handling
//!
//! - Fatal errors opening the file are returned from `open()`
//! - Malformed rows are yielded as `Err` items carrying the line number

use crate::io::raw_record::{RawRecord, SourceRecord};
use crate::types::ConvertError;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::rc::Rc;

/// CSV reader producing header-keyed raw records
#[derive(Debug)]
pub struct CsvRecordReader<R: Read> {
    reader: csv::Reader<BufReader<R>>,
    headers: Rc<StringRecord>,
    skip_lines: u64,
}

impl CsvRecordReader<File> {
    /// Open a CSV file for streaming iteration
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    /// * `delimiter` - Field delimiter of the format
    /// * `skip_lines` - Preamble lines before the header row
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the path does not exist, `Io`/`Csv` if the preamble or
    /// header row cannot be read.
    pub fn open(path: &Path, delimiter: u8, skip_lines: usize) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConvertError::file_not_found(path),
            _ => ConvertError::from(e),
        })?;
        Self::from_reader(file, delimiter, skip_lines)
    }
}

impl<R: Read> CsvRecordReader<R> {
    /// Wrap any reader; used by `open()` and by tests
    pub fn from_reader(input: R, delimiter: u8, skip_lines: usize) -> Result<Self, ConvertError> {
        let mut input = BufReader::new(input);
        let mut preamble = String::new();
        for _ in 0..skip_lines {
            preamble.clear();
            if input.read_line(&mut preamble)? == 0 {
                break;
            }
            debug!("Skipping preamble line: {}", preamble.trim_end());
        }

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(input);
        let headers = Rc::new(reader.headers()?.clone());
        debug!("CSV header: {:?}", headers);

        Ok(Self {
            reader,
            headers,
            skip_lines: skip_lines as u64,
        })
    }
}

impl<R: Read> Iterator for CsvRecordReader<R> {
    type Item = Result<SourceRecord, ConvertError>;

    /// Read the next data row
    ///
    /// # Returns
    ///
    /// * `Some(Ok(SourceRecord))` - a row and its line number in the file
    /// * `Some(Err(ConvertError))` - a malformed row
    /// * `None` - end of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => {
                let line = record.position().map_or(0, |pos| pos.line()) + self.skip_lines;
                Some(Ok(SourceRecord {
                    line,
                    record: RawRecord::row(Rc::clone(&self.headers), record),
                }))
            }
            Ok(false) => None,
            Err(e) => Some(Err(e.into())),
        }
    }
}
