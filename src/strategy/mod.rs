//! Processing strategy module
//!
//! A processing strategy knows how to turn an input file into a stream of
//! raw records: delimited text goes through the CSV reader, statements go
//! through PDF text extraction. Both then share the same pipeline,
//! [`convert_records`]: parser, merge engine, Chainreport writer.
//!
//! The strategy is chosen at runtime from the selected parser's
//! [`InputFormat`], with per-run overrides from [`ConverterConfig`].

use crate::core::{MergeEngine, Reporter};
use crate::io::{ChainreportWriter, SourceRecord};
use crate::parser::{ExchangeParser, InputFormat};
use crate::types::{ConversionStatistics, ConvertError};
use log::{debug, warn};
use std::io::Write;
use std::path::Path;

pub mod delimited;
pub mod statement;

pub use delimited::CsvProcessingStrategy;
pub use statement::PdfProcessingStrategy;

/// Documentation base used for the link in the run summary
pub const DEFAULT_WIKI_URL: &str = "https://github.com/nacrul-eth/chainreport-converter/wiki/HiParser";

/// Per-run settings
///
/// `None` overrides keep the selected format's own delimiter and preamble
/// length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Input delimiter override
    pub delimiter: Option<u8>,
    /// Preamble line count override
    pub skip_lines: Option<usize>,
    /// Base URL of the per-parser documentation
    pub wiki_url: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            skip_lines: None,
            wiki_url: DEFAULT_WIKI_URL.to_string(),
        }
    }
}

impl ConverterConfig {
    /// Create a ConverterConfig with custom values
    ///
    /// A delimiter that is not a single-byte ASCII character usable as a CSV
    /// separator, or a blank URL, falls back to the default with a warning.
    pub fn new(delimiter: Option<char>, skip_lines: Option<usize>, wiki_url: Option<String>) -> Self {
        let delimiter = delimiter.and_then(|c| {
            if c.is_ascii() && !matches!(c, '"' | '\n' | '\r') {
                Some(c as u8)
            } else {
                warn!("Invalid delimiter ({:?}), using the format's default", c);
                None
            }
        });

        let wiki_url = match wiki_url {
            Some(url) if url.trim().is_empty() => {
                warn!("Invalid wiki_url ({:?}), using default ({})", url, DEFAULT_WIKI_URL);
                DEFAULT_WIKI_URL.to_string()
            }
            Some(url) => url.trim().to_string(),
            None => DEFAULT_WIKI_URL.to_string(),
        };

        Self {
            delimiter,
            skip_lines,
            wiki_url,
        }
    }
}

/// Reads one kind of input file and runs it through the conversion pipeline
pub trait ProcessingStrategy {
    /// Convert `input_path` with `parser`, writing Chainreport rows to `output`
    ///
    /// # Returns
    ///
    /// The run statistics once every record was written and the output flushed.
    ///
    /// # Errors
    ///
    /// Any fatal fault aborts the run: unreadable input, a record the parser
    /// rejects, or an output write failure.
    fn process(
        &self,
        parser: &dyn ExchangeParser,
        input_path: &Path,
        output: &mut dyn Write,
        reporter: &mut Reporter<'_>,
    ) -> Result<ConversionStatistics, ConvertError>;
}

/// Create the processing strategy for an input format
///
/// # Arguments
///
/// * `format` - The selected parser's input format
/// * `config` - Overrides for delimiter and preamble length (CSV only)
pub fn create_strategy(format: InputFormat, config: &ConverterConfig) -> Box<dyn ProcessingStrategy> {
    match format {
        InputFormat::Csv {
            delimiter,
            skip_lines,
        } => Box::new(CsvProcessingStrategy::new(
            config.delimiter.unwrap_or(delimiter),
            config.skip_lines.unwrap_or(skip_lines),
        )),
        InputFormat::PdfText => Box::new(PdfProcessingStrategy),
    }
}

/// The shared pipeline: parse, merge, write
///
/// Writes the header first, then every record the merge engine releases, in
/// order, and finally whatever the engine still holds at end of input.
/// Parser faults are tagged with the input line they came from.
pub fn convert_records<I>(
    records: I,
    parser: &dyn ExchangeParser,
    output: &mut dyn Write,
    reporter: &mut Reporter<'_>,
) -> Result<ConversionStatistics, ConvertError>
where
    I: IntoIterator<Item = Result<SourceRecord, ConvertError>>,
{
    let mut writer = ChainreportWriter::new(output);
    writer.write_header()?;

    let mut engine = MergeEngine::new(parser.merge_rules());
    for source in records {
        let source = source?;
        let tx = parser
            .parse(&source.record)
            .map_err(|e| e.at_line(source.line))?;
        debug!("Line {}: {} '{}'", source.line, tx.category, tx.description);

        for ready in engine.process(tx, reporter) {
            writer.write_transaction(&ready)?;
        }
    }

    let (remaining, stats) = engine.finish(reporter);
    for ready in &remaining {
        writer.write_transaction(ready)?;
    }
    writer.flush()?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::RawRecord;
    use crate::parser::HiPdfParser;
    use rstest::rstest;

    #[rstest]
    #[case::defaults(None, None, None, ConverterConfig::default())]
    #[case::semicolon(
        Some(';'), Some(2), Some("https://example.org/wiki".to_string()),
        ConverterConfig { delimiter: Some(b';'), skip_lines: Some(2), wiki_url: "https://example.org/wiki".to_string() }
    )]
    #[case::non_ascii_delimiter(Some('€'), None, None, ConverterConfig::default())]
    #[case::quote_delimiter(Some('"'), None, None, ConverterConfig::default())]
    #[case::blank_url(None, None, Some("  ".to_string()), ConverterConfig::default())]
    fn test_config_new(
        #[case] delimiter: Option<char>,
        #[case] skip_lines: Option<usize>,
        #[case] wiki_url: Option<String>,
        #[case] expected: ConverterConfig,
    ) {
        assert_eq!(ConverterConfig::new(delimiter, skip_lines, wiki_url), expected);
    }

    fn statement(lines: &[&str]) -> Vec<Result<SourceRecord, ConvertError>> {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                Ok(SourceRecord {
                    line: index as u64 + 1,
                    record: RawRecord::line(*line),
                })
            })
            .collect()
    }

    #[test]
    fn test_convert_records_joins_and_writes() {
        let records = statement(&[
            "2023-01-31 23:59 UTC buy HI paid 100 HI",
            "2023-01-31 23:59 UTC buy HI paid -50 EUR",
            "2023-02-01 10:00 UTC Card consume -3 EUR",
            "2023-02-02 10:00 UTC HI rebate 1.5 HI",
        ]);
        let mut output: Vec<u8> = Vec::new();
        let mut reporter = Reporter::silent();
        let stats = convert_records(records, &HiPdfParser, &mut output, &mut reporter).unwrap();

        let text = String::from_utf8(output).unwrap();
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(
            rows,
            vec![
                "31.01.2023 23:59;Trade;100;HI;50;EUR;;;;buy HI paid",
                "02.02.2023 10:00;Cashback;1,5;HI;;;;;;HI rebate",
            ]
        );
        assert_eq!(stats.input_linecount, 4);
        assert_eq!(stats.output_linecount, 2);
        assert_eq!(stats.ignored, 1);
    }

    #[test]
    fn test_parser_fault_carries_line_number() {
        let records = statement(&["2023-01-31 23:59 UTC HI rebate 1 HI", "2023-01-31 broken"]);
        let mut output: Vec<u8> = Vec::new();
        let result = convert_records(records, &HiPdfParser, &mut output, &mut Reporter::silent());

        assert_eq!(
            result.unwrap_err(),
            ConvertError::unmatched_line("2023-01-31 broken").at_line(2)
        );
    }
}
