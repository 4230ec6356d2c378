//! Error types for the Chainreport converter
//!
//! This module defines every fatal fault a conversion run can hit. Anything
//! listed here aborts the run and is propagated to the caller; recoverable
//! conditions (unknown descriptions, unconfirmed withdrawals, stray cancels)
//! are not errors in this sense and are counted in
//! [`ConversionStatistics`](crate::types::ConversionStatistics) instead.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: input not found, output not writable
//! - **Reader Errors**: malformed CSV, unreadable PDF
//! - **Record Errors**: missing fields, bad dates, bad amounts, unrecognised statement lines

use thiserror::Error;

/// Main error type for the converter
///
/// Each variant carries enough context to point the operator at the
/// offending value in the export file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    /// Input file not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV reading or writing failed
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the CSV error
        message: String,
    },

    /// PDF text extraction failed
    #[error("PDF error: {message}")]
    Pdf {
        /// Description of the extraction error
        message: String,
    },

    /// A column required by the selected format is absent or empty
    #[error("Missing required field '{field}'")]
    MissingField {
        /// Column name
        field: String,
    },

    /// A timestamp does not match the format's date pattern
    #[error("Invalid date '{value}' in field '{field}' (expected pattern '{pattern}')")]
    InvalidDate {
        /// Column name
        field: String,
        /// The rejected value
        value: String,
        /// chrono pattern the value was parsed with
        pattern: String,
    },

    /// An amount is not a decimal number
    #[error("Invalid amount '{value}' in field '{field}'")]
    InvalidAmount {
        /// Column name
        field: String,
        /// The rejected value
        value: String,
    },

    /// A statement line could not be split into date, description, amount and currency
    #[error("Unrecognised statement line: '{line}'")]
    UnmatchedLine {
        /// The raw text line
        line: String,
    },

    /// A record does not have the shape the format's reader expects
    #[error("Unexpected record shape: {message}")]
    RecordShape {
        /// Description of the mismatch
        message: String,
    },

    /// Any of the above, tagged with the input line it came from
    #[error("Line {line}: {source}")]
    AtLine {
        /// 1-based line number in the input
        line: u64,
        /// The underlying fault
        #[source]
        source: Box<ConvertError>,
    },
}

// Conversion from io::Error to ConvertError
impl From<std::io::Error> for ConvertError {
    fn from(error: std::io::Error) -> Self {
        ConvertError::Io {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to ConvertError
impl From<csv::Error> for ConvertError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());
        ConvertError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors
impl ConvertError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        ConvertError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: &str) -> Self {
        ConvertError::MissingField {
            field: field.to_string(),
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(field: &str, value: &str, pattern: &str) -> Self {
        ConvertError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
            pattern: pattern.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(field: &str, value: &str) -> Self {
        ConvertError::InvalidAmount {
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an UnmatchedLine error
    pub fn unmatched_line(line: &str) -> Self {
        ConvertError::UnmatchedLine {
            line: line.to_string(),
        }
    }

    /// Create a RecordShape error
    pub fn record_shape(message: impl Into<String>) -> Self {
        ConvertError::RecordShape {
            message: message.into(),
        }
    }

    /// Tag this error with the input line it was raised for
    ///
    /// Errors that already carry a line number are returned unchanged.
    pub fn at_line(self, line: u64) -> Self {
        match self {
            ConvertError::AtLine { .. } | ConvertError::Csv { line: Some(_), .. } => self,
            other => ConvertError::AtLine {
                line,
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::path::Path;

    #[rstest]
    #[case::file_not_found(
        ConvertError::FileNotFound { path: "missing.csv".to_string() },
        "File not found: missing.csv"
    )]
    #[case::csv_with_line(
        ConvertError::Csv { line: Some(7), message: "bad quote".to_string() },
        "CSV error at line 7: bad quote"
    )]
    #[case::csv_without_line(
        ConvertError::Csv { line: None, message: "bad quote".to_string() },
        "CSV error: bad quote"
    )]
    #[case::missing_field(
        ConvertError::missing_field("Date"),
        "Missing required field 'Date'"
    )]
    #[case::invalid_date(
        ConvertError::invalid_date("Date", "31.01.2023", "%Y-%m-%d %H:%M UTC"),
        "Invalid date '31.01.2023' in field 'Date' (expected pattern '%Y-%m-%d %H:%M UTC')"
    )]
    #[case::invalid_amount(
        ConvertError::invalid_amount("amount", "abc"),
        "Invalid amount 'abc' in field 'amount'"
    )]
    #[case::unmatched_line(
        ConvertError::unmatched_line("2023-01-31 garbage"),
        "Unrecognised statement line: '2023-01-31 garbage'"
    )]
    #[case::at_line(
        ConvertError::missing_field("type").at_line(4),
        "Line 4: Missing required field 'type'"
    )]
    fn test_error_display(#[case] error: ConvertError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn test_at_line_keeps_existing_position() {
        let error = ConvertError::Csv {
            line: Some(3),
            message: "bad".to_string(),
        };
        assert_eq!(error.clone().at_line(9), error);

        let tagged = ConvertError::missing_field("Date").at_line(2);
        assert_eq!(tagged.clone().at_line(5), tagged);
    }

    #[test]
    fn test_file_not_found_helper() {
        let error = ConvertError::file_not_found(Path::new("input.csv"));
        assert_eq!(
            error,
            ConvertError::FileNotFound {
                path: "input.csv".to_string()
            }
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: ConvertError = io_error.into();
        assert!(matches!(error, ConvertError::Io { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
