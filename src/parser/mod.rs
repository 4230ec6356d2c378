//! Exchange parser module
//!
//! Each supported export format is one unit struct implementing
//! [`ExchangeParser`]. A parser is stateless: it turns one raw input unit (a
//! header-keyed CSV row or a text line) into one [`NormalizedTransaction`] and
//! describes how its input has to be read and which merge rules apply to it.
//!
//! # Design
//!
//! The set of formats is closed. [`ParserType`] enumerates them for the CLI,
//! and [`ParserType::parser`] is the static dispatch table mapping a selector
//! to its `&'static dyn ExchangeParser`. Classification tables are immutable
//! statics living next to each parser; the matching algorithm is shared in
//! [`classification`].

use crate::io::RawRecord;
use crate::types::{ConvertError, NormalizedTransaction};
use clap::ValueEnum;

pub mod classification;
pub mod coinbase;
pub mod coinbase_pro;
pub mod ethereum;
pub mod fields;
pub mod hi_csv;
pub mod hi_pdf;
pub mod kraken;
pub mod nexo;
pub mod plutus;

pub use classification::ClassificationTable;
pub use coinbase::CoinbaseCsvParser;
pub use coinbase_pro::CoinbaseProCsvParser;
pub use ethereum::EthereumCsvParser;
pub use hi_csv::HiCsvParser;
pub use hi_pdf::HiPdfParser;
pub use kraken::KrakenCsvParser;
pub use nexo::NexoCsvParser;
pub use plutus::PlutusCsvParser;

/// How the converter has to read a format's input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Delimited text with a header row
    Csv {
        /// Field delimiter
        delimiter: u8,
        /// Preamble lines before the header row
        skip_lines: usize,
    },
    /// PDF statement (or already extracted text), one transaction per line
    PdfText,
}

/// Per-format switches for the merge engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeRules {
    /// Trades are exported as two consecutive lines, one per leg
    pub split_trades: bool,
    /// Withdrawals may be followed by a cancel line and need confirming
    pub confirm_withdrawals: bool,
}

/// Adapter from one exchange export schema to [`NormalizedTransaction`]
pub trait ExchangeParser: Sync {
    /// Adapter name, used for the documentation link in the run summary
    fn name(&self) -> &'static str;

    /// How the input file is read
    fn input_format(&self) -> InputFormat;

    /// Merge rules applied to this format's records
    fn merge_rules(&self) -> MergeRules {
        MergeRules::default()
    }

    /// Convert one raw record
    ///
    /// # Errors
    ///
    /// Fails if a required field is missing, a date does not match the
    /// format's pattern, an amount is not a number, or the record has the
    /// wrong shape for this parser (a text line handed to a CSV parser).
    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError>;
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParserType {
    /// Hi app CSV export
    HiCsv,
    /// Hi monthly statement PDF
    HiPdf,
    /// Plutus rewards export (pipe separated)
    PlutusCsv,
    /// Nexo transaction export
    NexoCsv,
    /// Kraken ledger export
    KrakenCsv,
    /// Coinbase transaction history
    CoinbaseCsv,
    /// Coinbase Pro account statement
    CoinbaseProCsv,
    /// Etherscan transaction export
    EthereumCsv,
}

impl ParserType {
    /// Look up the parser implementing this format
    pub fn parser(self) -> &'static dyn ExchangeParser {
        match self {
            ParserType::HiCsv => &HiCsvParser,
            ParserType::HiPdf => &HiPdfParser,
            ParserType::PlutusCsv => &PlutusCsvParser,
            ParserType::NexoCsv => &NexoCsvParser,
            ParserType::KrakenCsv => &KrakenCsvParser,
            ParserType::CoinbaseCsv => &CoinbaseCsvParser,
            ParserType::CoinbaseProCsv => &CoinbaseProCsvParser,
            ParserType::EthereumCsv => &EthereumCsvParser,
        }
    }
}
