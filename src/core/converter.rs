//! Run orchestration
//!
//! A [`Converter`] ties a selected parser to the processing strategy for its
//! input format and emits the operator summary once the run completes.

use crate::core::reporter::Reporter;
use crate::parser::{ExchangeParser, ParserType};
use crate::strategy::{create_strategy, ConverterConfig};
use crate::types::{ConversionStatistics, ConvertError};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Converts one exchange export into a Chainreport file
#[derive(Debug, Clone)]
pub struct Converter {
    parser_type: ParserType,
    config: ConverterConfig,
}

impl Converter {
    pub fn new(parser_type: ParserType, config: ConverterConfig) -> Self {
        Converter {
            parser_type,
            config,
        }
    }

    /// The adapter selected for this converter
    pub fn parser(&self) -> &'static dyn ExchangeParser {
        self.parser_type.parser()
    }

    /// Convert `input_path`, writing the Chainreport rows to `output`
    ///
    /// Operator messages and the final summary go to `callback` when one is
    /// given.
    ///
    /// # Errors
    ///
    /// Returns the first fatal fault; `output` may then hold a partial file.
    pub fn convert(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
        callback: Option<&mut dyn FnMut(&str)>,
    ) -> Result<ConversionStatistics, ConvertError> {
        let parser = self.parser();
        info!("Converting {} with {}", input_path.display(), parser.name());

        let strategy = create_strategy(parser.input_format(), &self.config);
        let mut reporter = Reporter::new(callback);
        let stats = strategy.process(parser, input_path, output, &mut reporter)?;

        info!(
            "Finished {}: {} read, {} written",
            parser.name(),
            stats.input_linecount,
            stats.output_linecount
        );
        reporter.report(&stats.summary(parser.name(), &self.config.wiki_url));
        Ok(stats)
    }

    /// Convert between two files, creating (or truncating) the output file
    ///
    /// # Errors
    ///
    /// `FileNotFound` if the input does not exist; the output is not created
    /// in that case.
    pub fn convert_files(
        &self,
        input_path: &Path,
        output_path: &Path,
        callback: Option<&mut dyn FnMut(&str)>,
    ) -> Result<ConversionStatistics, ConvertError> {
        if !input_path.exists() {
            return Err(ConvertError::file_not_found(input_path));
        }

        let mut output = BufWriter::new(File::create(output_path)?);
        let stats = self.convert(input_path, &mut output, callback)?;
        output.flush()?;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const PLUTUS_EXPORT: &str = "\
createdAt|type|amount|statement_id|reference_type
2023-01-05T10:15:00.000Z|DAILY_REBATE_DISTRIBUTION|1.25|S-1|Card purchase reward
2023-01-06T08:00:00.000Z|MYSTERY|2|S-2|Unknown
";

    #[test]
    fn test_convert_reports_summary() {
        let input = create_temp_csv(PLUTUS_EXPORT);
        let converter = Converter::new(ParserType::PlutusCsv, ConverterConfig::default());

        let mut messages: Vec<String> = Vec::new();
        let mut output: Vec<u8> = Vec::new();
        let stats = {
            let mut collect = |message: &str| messages.push(message.to_string());
            converter
                .convert(input.path(), &mut output, Some(&mut collect))
                .unwrap()
        };

        assert_eq!(stats.input_linecount, 2);
        assert_eq!(stats.output_linecount, 2);
        assert_eq!(stats.errors, 1);

        let summary = messages.last().unwrap();
        assert!(summary.contains("Read lines: 2"));
        assert!(summary.contains("Number of Errors: 1 - Please report them"));
        assert!(summary.ends_with(&format!(
            "{}/PlutusParserCsv\n{}",
            crate::strategy::DEFAULT_WIKI_URL,
            "-".repeat(70)
        )));
        assert!(messages[0].starts_with("Please report line"));
    }

    #[test]
    fn test_convert_without_callback() {
        let input = create_temp_csv(PLUTUS_EXPORT);
        let converter = Converter::new(ParserType::PlutusCsv, ConverterConfig::default());
        let mut output: Vec<u8> = Vec::new();

        let stats = converter.convert(input.path(), &mut output, None).unwrap();
        assert_eq!(stats.output_linecount, 2);
        assert_eq!(String::from_utf8(output).unwrap().lines().count(), 3);
    }

    #[test]
    fn test_convert_files_writes_output() {
        let input = create_temp_csv(PLUTUS_EXPORT);
        let output = NamedTempFile::new().unwrap();
        let converter = Converter::new(ParserType::PlutusCsv, ConverterConfig::default());

        converter
            .convert_files(input.path(), output.path(), None)
            .unwrap();

        let written = fs::read_to_string(output.path()).unwrap();
        assert!(written.starts_with("Zeitpunkt;Transaktions Typ;"));
        assert!(written.contains("05.01.2023 10:15;Cashback;1,25;PLU;;;;;S-1;Card purchase reward\n"));
    }

    #[test]
    fn test_convert_files_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("out.csv");
        let converter = Converter::new(ParserType::HiCsv, ConverterConfig::default());

        let result = converter.convert_files(&dir.path().join("missing.csv"), &output_path, None);

        assert!(matches!(result, Err(ConvertError::FileNotFound { .. })));
        assert!(!output_path.exists());
    }
}
