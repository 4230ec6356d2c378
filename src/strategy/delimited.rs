//! Delimited-text processing strategy
//!
//! Streams CSV exports one row at a time through the shared pipeline. Memory
//! use stays constant apart from the one record the merge engine may hold.

use crate::core::Reporter;
use crate::io::CsvRecordReader;
use crate::parser::ExchangeParser;
use crate::strategy::{convert_records, ProcessingStrategy};
use crate::types::{ConversionStatistics, ConvertError};
use log::info;
use std::io::Write;
use std::path::Path;

/// Reads CSV exports with a fixed delimiter and preamble length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvProcessingStrategy {
    delimiter: u8,
    skip_lines: usize,
}

impl CsvProcessingStrategy {
    pub fn new(delimiter: u8, skip_lines: usize) -> Self {
        CsvProcessingStrategy {
            delimiter,
            skip_lines,
        }
    }
}

impl ProcessingStrategy for CsvProcessingStrategy {
    fn process(
        &self,
        parser: &dyn ExchangeParser,
        input_path: &Path,
        output: &mut dyn Write,
        reporter: &mut Reporter<'_>,
    ) -> Result<ConversionStatistics, ConvertError> {
        let reader = CsvRecordReader::open(input_path, self.delimiter, self.skip_lines)?;
        info!(
            "Reading {} (delimiter {:?}, {} preamble lines)",
            input_path.display(),
            self.delimiter as char,
            self.skip_lines
        );
        convert_records(reader, parser, output, reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{HiCsvParser, KrakenCsvParser};
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn rows(output: Vec<u8>) -> Vec<String> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .skip(1)
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_hi_export_with_split_trade() {
        let file = create_temp_csv(
            "Date,Description,Received Amount,Received Currency,Sent Amount,Sent Currency,Fee Amount,Fee Currency,TxHash\n\
             2023-01-31 23:59 UTC,buy HI paid,100,HI,,,,,0xabc\n\
             2023-01-31 23:59 UTC,buy HI paid,,,50.5,EUR,,,0xabc\n\
             2023-02-01 08:00 UTC,Crypto deposit,0.1,BTC,,,,,0xdef\n",
        );
        let mut output: Vec<u8> = Vec::new();
        let stats = CsvProcessingStrategy::new(b',', 0)
            .process(&HiCsvParser, file.path(), &mut output, &mut Reporter::silent())
            .unwrap();

        assert_eq!(
            rows(output),
            vec![
                "31.01.2023 23:59;Trade;100;HI;50,5;EUR;;;0xabc;buy HI paid",
                "01.02.2023 08:00;Deposit;0,1;BTC;;;;;0xdef;Crypto deposit",
            ]
        );
        assert_eq!(stats.input_linecount, 3);
        assert_eq!(stats.output_linecount, 2);
    }

    #[test]
    fn test_delimiter_override() {
        let file = create_temp_csv(
            "txid;time;type;asset;amount;fee\n\
             T1;2023-03-01 12:00:00;deposit;EUR;100;0\n",
        );
        let mut output: Vec<u8> = Vec::new();
        CsvProcessingStrategy::new(b';', 0)
            .process(&KrakenCsvParser, file.path(), &mut output, &mut Reporter::silent())
            .unwrap();

        assert_eq!(rows(output), vec!["01.03.2023 12:00;Deposit;100;EUR;;;;;T1;deposit"]);
    }

    #[test]
    fn test_missing_file() {
        let mut output: Vec<u8> = Vec::new();
        let result = CsvProcessingStrategy::new(b',', 0).process(
            &HiCsvParser,
            Path::new("/nonexistent/export.csv"),
            &mut output,
            &mut Reporter::silent(),
        );
        assert!(matches!(result, Err(ConvertError::FileNotFound { .. })));
    }
}
