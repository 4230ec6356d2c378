//! I/O module
//!
//! Handles reading exchange exports and writing the Chainreport file.
//!
//! # Components
//!
//! - `raw_record` - Raw input units (CSV rows, statement lines) handed to the parsers
//! - `csv_reader` - Streaming CSV reader with iterator interface
//! - `pdf_reader` - Statement line extraction from PDF (or extracted text) files
//! - `chainreport_writer` - Chainreport output serialization

pub mod chainreport_writer;
pub mod csv_reader;
pub mod pdf_reader;
pub mod raw_record;

pub use chainreport_writer::{write_chainreport, ChainreportWriter, CHAINREPORT_HEADER};
pub use csv_reader::CsvRecordReader;
pub use pdf_reader::read_statement_lines;
pub use raw_record::{CsvRow, RawRecord, SourceRecord};
