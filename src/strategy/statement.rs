//! Statement processing strategy
//!
//! Extracts the text layer of a statement up front, keeps the transaction
//! lines, and runs them through the shared pipeline.

use crate::core::Reporter;
use crate::io::read_statement_lines;
use crate::parser::ExchangeParser;
use crate::strategy::{convert_records, ProcessingStrategy};
use crate::types::{ConversionStatistics, ConvertError};
use log::info;
use std::io::Write;
use std::path::Path;

/// Reads PDF statements (or their extracted text)
#[derive(Debug, Clone, Copy)]
pub struct PdfProcessingStrategy;

impl ProcessingStrategy for PdfProcessingStrategy {
    fn process(
        &self,
        parser: &dyn ExchangeParser,
        input_path: &Path,
        output: &mut dyn Write,
        reporter: &mut Reporter<'_>,
    ) -> Result<ConversionStatistics, ConvertError> {
        let lines = read_statement_lines(input_path)?;
        info!(
            "Extracted {} statement lines from {}",
            lines.len(),
            input_path.display()
        );
        convert_records(lines.into_iter().map(Ok), parser, output, reporter)
    }
}
