//! Etherscan transaction export
//!
//! All values are in ETH. Etherscan fills both value columns on every line,
//! so zero amounts are rendered empty to keep only the real leg.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{nonzero_decimal_text, parse_timestamp};
use crate::parser::{ExchangeParser, InputFormat};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use serde::Deserialize;

const DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";
const ETH: &str = "ETH";

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[
        (Category::Deposit, &["Transfer"]),
        (Category::Withdrawal, &["Deposit", "Transfer From"]),
        (Category::Trade, &["Buy", "Mint", "Pre Sale Mint"]),
    ],
    noise: &[],
};

#[derive(Debug, Deserialize)]
struct EtherscanRow {
    #[serde(rename = "Transaction Hash")]
    hash: String,
    #[serde(rename = "DateTime (UTC)")]
    date: String,
    #[serde(rename = "Value_IN(ETH)", default)]
    value_in: String,
    #[serde(rename = "Value_OUT(ETH)", default)]
    value_out: String,
    #[serde(rename = "TxnFee(ETH)", default)]
    fee: String,
    #[serde(rename = "Method", default)]
    method: String,
}

fn with_currency(amount: String) -> (String, &'static str) {
    let currency = if amount.is_empty() { "" } else { ETH };
    (amount, currency)
}

#[derive(Debug, Clone, Copy)]
pub struct EthereumCsvParser;

impl ExchangeParser for EthereumCsvParser {
    fn name(&self) -> &'static str {
        "EthereumParserCsv"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv {
            delimiter: b',',
            skip_lines: 0,
        }
    }

    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError> {
        let row: EtherscanRow = record.deserialize()?;
        let method = row.method.trim();
        let timestamp = parse_timestamp(&row.date, DATE_PATTERN, "DateTime (UTC)")?;

        let (received, received_currency) =
            with_currency(nonzero_decimal_text(&row.value_in, "Value_IN(ETH)")?);
        let (sent, sent_currency) =
            with_currency(nonzero_decimal_text(&row.value_out, "Value_OUT(ETH)")?);
        let (fee, fee_currency) = with_currency(nonzero_decimal_text(&row.fee, "TxnFee(ETH)")?);

        Ok(
            NormalizedTransaction::new(timestamp, TABLE.classify(method), method)
                .with_received(received, received_currency)
                .with_sent(sent, sent_currency)
                .with_fee(fee, fee_currency)
                .with_order_id(row.hash.trim())
                .with_skip(TABLE.is_noise(method))
                .with_raw_input(record.render()),
        )
    }
}
