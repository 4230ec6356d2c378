//! Coinbase Pro account statement
//!
//! Like the Kraken ledger, each line moves a single unit and the sign of
//! `amount` decides the leg. `match` lines come in pairs.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{parse_timestamp, required, signed_decimal_text, Side};
use crate::parser::{ExchangeParser, InputFormat, MergeRules};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use serde::Deserialize;

const DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[
        (Category::Deposit, &["deposit"]),
        (Category::Withdrawal, &["withdrawal"]),
        (Category::Trade, &["match"]),
        (Category::Fee, &["fee"]),
    ],
    noise: &["transfer"],
};

#[derive(Debug, Deserialize)]
struct CoinbaseProRow {
    #[serde(rename = "type")]
    kind: String,
    time: String,
    amount: String,
    #[serde(rename = "amount/balance unit")]
    unit: String,
    #[serde(rename = "order id", default)]
    order_id: String,
}

#[derive(Debug, Clone, Copy)]
pub struct CoinbaseProCsvParser;

impl ExchangeParser for CoinbaseProCsvParser {
    fn name(&self) -> &'static str {
        "CoinbaseProParserCsv"
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
        let row: CoinbaseProRow = record.deserialize()?;
        let kind = row.kind.trim();
        let unit = row.unit.trim();
        let timestamp = parse_timestamp(&row.time, DATE_PATTERN, "time")?;

        let tx = NormalizedTransaction::new(timestamp, TABLE.classify(kind), kind);
        let tx = match signed_decimal_text(required(&row.amount, "amount")?, "amount")? {
            Some((Side::Sent, amount)) => tx.with_sent(amount, unit),
            Some((Side::Received, amount)) => tx.with_received(amount, unit),
            None => tx,
        };

        Ok(tx
            .with_order_id(row.order_id.trim())
            .with_skip(TABLE.is_noise(kind))
            .with_raw_input(record.render()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;
    use rstest::rstest;
    use std::rc::Rc;

    fn statement_line(kind: &str, amount: &str, unit: &str) -> RawRecord {
        RawRecord::row(
            Rc::new(StringRecord::from(vec![
                "portfolio",
                "type",
                "time",
                "amount",
                "balance",
                "amount/balance unit",
                "transfer id",
                "trade id",
                "order id",
            ])),
            StringRecord::from(vec![
                "default",
                kind,
                "2023-01-01T12:00:00.123Z",
                amount,
                "10.0",
                unit,
                "",
                "42",
                "ord-7",
            ]),
        )
    }

    #[rstest]
    #[case::match_buy("match", "0.01", Category::Trade, true)]
    #[case::match_sell("match", "-300.50", Category::Trade, false)]
    #[case::fee("fee", "-1.2", Category::Fee, false)]
    #[case::deposit("deposit", "1000", Category::Deposit, true)]
    #[case::withdrawal("withdrawal", "-0.5", Category::Withdrawal, false)]
    fn test_lines(
        #[case] kind: &str,
        #[case] amount: &str,
        #[case] category: Category,
        #[case] received: bool,
    ) {
        let tx = CoinbaseProCsvParser
            .parse(&statement_line(kind, amount, "BTC"))
            .unwrap();

        assert_eq!(tx.category, category);
        assert_eq!(tx.has_received(), received);
        assert_eq!(tx.has_sent(), !received);
        assert_eq!(tx.order_id, "ord-7");
        assert_eq!(tx.date_string(), "01.01.2023 12:00");
    }

    #[test]
    fn test_transfer_is_noise() {
        let tx = CoinbaseProCsvParser
            .parse(&statement_line("transfer", "5", "EUR"))
            .unwrap();
        assert!(tx.skip);
    }
}
