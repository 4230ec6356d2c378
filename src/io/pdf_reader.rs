//! Statement line extraction from PDF files
//!
//! The text layer of the PDF is extracted with `pdf-extract`; every line that
//! starts with a date (`YYYY-`) is a transaction line, everything else is
//! page furniture. Files with a `.txt` extension are taken as already
//! extracted text.

use crate::io::raw_record::{RawRecord, SourceRecord};
use crate::types::ConvertError;
use log::debug;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn statement_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-").expect("invalid statement line regex"))
}

/// Extract the text of a statement file
///
/// # Errors
///
/// `FileNotFound` for a missing path, `Pdf` if the text layer cannot be
/// extracted, `Io` if a text file cannot be read.
pub fn extract_statement_text(path: &Path) -> Result<String, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::file_not_found(path));
    }
    let is_text = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if is_text {
        Ok(std::fs::read_to_string(path)?)
    } else {
        pdf_extract::extract_text(path).map_err(|e| ConvertError::Pdf {
            message: e.to_string(),
        })
    }
}

/// Keep the transaction lines of an extracted statement
///
/// Line numbers refer to the extracted text.
pub fn statement_lines(text: &str) -> Vec<SourceRecord> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let line = line.trim();
            if statement_line_re().is_match(line) {
                Some(SourceRecord {
                    line: index as u64 + 1,
                    record: RawRecord::line(line),
                })
            } else {
                if !line.is_empty() {
                    debug!("Ignoring statement text: {}", line);
                }
                None
            }
        })
        .collect()
}

/// Extract a statement and return its transaction lines
pub fn read_statement_lines(path: &Path) -> Result<Vec<SourceRecord>, ConvertError> {
    let text = extract_statement_text(path)?;
    Ok(statement_lines(&text))
}
