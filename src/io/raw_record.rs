//! Raw input units handed to the parsers
//!
//! A [`RawRecord`] is either a header-keyed CSV row or a single text line
//! taken from a PDF statement. Besides giving the parsers access to the data,
//! it renders itself as text for error messages shown to the operator.

use crate::types::ConvertError;
use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::rc::Rc;

/// A CSV data row together with the header row of its file
#[derive(Debug, Clone)]
pub struct CsvRow {
    headers: Rc<StringRecord>,
    record: StringRecord,
}

impl CsvRow {
    pub fn new(headers: Rc<StringRecord>, record: StringRecord) -> Self {
        CsvRow { headers, record }
    }

    /// Deserialize the row by header name into a format-specific struct
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConvertError> {
        Ok(self.record.deserialize(Some(self.headers.as_ref()))?)
    }

    /// `Header: value` pairs joined by `, `
    pub fn render(&self) -> String {
        self.headers
            .iter()
            .zip(self.record.iter())
            .map(|(header, value)| format!("{header}: {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One unit of parser input
#[derive(Debug, Clone)]
pub enum RawRecord {
    Row(CsvRow),
    Line(String),
}

impl RawRecord {
    /// Build a row record
    pub fn row(headers: Rc<StringRecord>, record: StringRecord) -> Self {
        RawRecord::Row(CsvRow::new(headers, record))
    }

    /// Build a text line record
    pub fn line(text: impl Into<String>) -> Self {
        RawRecord::Line(text.into())
    }

    /// The CSV row, or `RecordShape` for a text line
    pub fn as_row(&self) -> Result<&CsvRow, ConvertError> {
        match self {
            RawRecord::Row(row) => Ok(row),
            RawRecord::Line(_) => Err(ConvertError::record_shape(
                "expected a CSV row, got a text line",
            )),
        }
    }

    /// The text line, or `RecordShape` for a CSV row
    pub fn as_line(&self) -> Result<&str, ConvertError> {
        match self {
            RawRecord::Line(line) => Ok(line),
            RawRecord::Row(_) => Err(ConvertError::record_shape(
                "expected a text line, got a CSV row",
            )),
        }
    }

    /// Deserialize a CSV row record; text lines are rejected
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConvertError> {
        self.as_row()?.deserialize()
    }

    /// Text rendering used in error reports
    pub fn render(&self) -> String {
        match self {
            RawRecord::Row(row) => row.render(),
            RawRecord::Line(line) => line.clone(),
        }
    }
}

/// A raw record together with its 1-based line number in the input
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub line: u64,
    pub record: RawRecord,
}
