//! Kraken ledger export
//!
//! Every ledger entry moves one asset, so the sign of `amount` decides the
//! leg. A trade shows up as two entries (one per asset), which the merge
//! engine joins back together.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{nonzero_decimal_text, parse_timestamp, required, signed_decimal_text, Side};
use crate::parser::{ExchangeParser, InputFormat, MergeRules};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use serde::Deserialize;

const DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[
        (Category::Deposit, &["deposit"]),
        (Category::Withdrawal, &["withdrawal"]),
        (Category::Trade, &["trade", "spend", "receive"]),
        (Category::Staking, &["staking"]),
    ],
    noise: &["transfer"],
};

#[derive(Debug, Deserialize)]
struct KrakenRow {
    txid: String,
    time: String,
    #[serde(rename = "type")]
    kind: String,
    asset: String,
    amount: String,
    #[serde(default)]
    fee: String,
}

#[derive(Debug, Clone, Copy)]
pub struct KrakenCsvParser;

impl ExchangeParser for KrakenCsvParser {
    fn name(&self) -> &'static str {
        "KrakenParserCsv"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv {
            delimiter: b',',
            skip_lines: 0,
        }
    }

    fn merge_rules(&self) -> MergeRules {
        MergeRules {
            split_trades: true,
            confirm_withdrawals: false,
        }
    }

    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError> {
        let row: KrakenRow = record.deserialize()?;
        let kind = row.kind.trim();
        let asset = row.asset.trim();
        let timestamp = parse_timestamp(&row.time, DATE_PATTERN, "time")?;

        let tx = NormalizedTransaction::new(timestamp, TABLE.classify(kind), kind);
        let tx = match signed_decimal_text(required(&row.amount, "amount")?, "amount")? {
            Some((Side::Sent, amount)) => tx.with_sent(amount, asset),
            Some((Side::Received, amount)) => tx.with_received(amount, asset),
            None => tx,
        };
        let fee = nonzero_decimal_text(&row.fee, "fee")?;
        let tx = if fee.is_empty() {
            tx
        } else {
            tx.with_fee(fee, asset)
        };

        Ok(tx
            .with_order_id(row.txid.trim())
            .with_skip(TABLE.is_noise(kind))
            .with_raw_input(record.render()))
    }
}
