//! Nexo transaction export
//!
//! Trades receive the output side and send the input side. Payments and
//! withdrawals only send the input side; every other type receives it.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{parse_timestamp, required, signed_decimal_text};
use crate::parser::{ExchangeParser, InputFormat};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use serde::Deserialize;

const DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[
        (Category::Cashback, &["Exchange Cashback"]),
        (Category::Deposit, &["Deposit To Exchange", "Top up Crypto"]),
        (Category::Withdrawal, &["Withdrawal"]),
        (Category::Trade, &["Exchange"]),
        (Category::Payment, &["Withdraw Exchanged"]),
        (Category::OtherIncome, &["Interest", "Fixed Term Interest"]),
    ],
    noise: &[
        "Exchange Deposited On",
        "Credit Card Fiaxt Refund",
        "Unlocking Term Deposit",
        "Locking Term Deposit",
        "Credit Card Fiatx Exchange To Withdraw",
        "Credit Card Fiatx Authorization",
        "Credit Card Fiatx Refund",
    ],
};

#[derive(Debug, Deserialize)]
struct NexoRow {
    #[serde(rename = "Transaction")]
    transaction: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Input Currency")]
    input_currency: String,
    #[serde(rename = "Input Amount")]
    input_amount: String,
    #[serde(rename = "Output Currency", default)]
    output_currency: String,
    #[serde(rename = "Output Amount", default)]
    output_amount: String,
    #[serde(rename = "Details", default)]
    details: String,
    #[serde(rename = "Date / Time (UTC)")]
    date: String,
}

/// Unsigned comma text of a possibly negative amount
fn magnitude(value: &str, field: &str) -> Result<String, ConvertError> {
    Ok(signed_decimal_text(value, field)?
        .map(|(_, amount)| amount)
        .unwrap_or_default())
}

#[derive(Debug, Clone, Copy)]
pub struct NexoCsvParser;

impl ExchangeParser for NexoCsvParser {
    fn name(&self) -> &'static str {
        "NexoParserCsv"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv {
            delimiter: b',',
            skip_lines: 0,
        }
    }

    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError> {
        let row: NexoRow = record.deserialize()?;
        let kind = row.kind.trim();
        let category = TABLE.classify(kind);
        let timestamp = parse_timestamp(&row.date, DATE_PATTERN, "Date / Time (UTC)")?;

        let tx = NormalizedTransaction::new(timestamp, category, row.details.trim());
        let skip = TABLE.is_noise(kind);
        let tx = if skip {
            tx
        } else {
            let input_amount = magnitude(required(&row.input_amount, "Input Amount")?, "Input Amount")?;
            let input_currency = row.input_currency.trim();
            match category {
                Category::Trade => tx
                    .with_received(
                        magnitude(&row.output_amount, "Output Amount")?,
                        row.output_currency.trim(),
                    )
                    .with_sent(input_amount, input_currency),
                Category::Payment | Category::Withdrawal => {
                    tx.with_sent(input_amount, input_currency)
                }
                _ => tx.with_received(input_amount, input_currency),
            }
        };

        Ok(tx
            .with_order_id(row.transaction.trim())
            .with_skip(skip)
            .with_raw_input(record.render()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;
    use rstest::rstest;
    use std::rc::Rc;

    const HEADER: [&str; 8] = [
        "Transaction",
        "Type",
        "Input Currency",
        "Input Amount",
        "Output Currency",
        "Output Amount",
        "Details",
        "Date / Time (UTC)",
    ];

    fn nexo_row(kind: &str, input: (&str, &str), output: (&str, &str)) -> RawRecord {
        RawRecord::row(
            Rc::new(StringRecord::from(HEADER.to_vec())),
            StringRecord::from(vec![
                "NXT1",
                kind,
                input.0,
                input.1,
                output.0,
                output.1,
                "approved / details",
                "2023-01-01 12:00:00",
            ]),
        )
    }

    #[test]
    fn test_trade_swaps_sides() {
        let tx = NexoCsvParser
            .parse(&nexo_row("Exchange", ("EUR", "-100.00"), ("BTC", "0.005")))
            .unwrap();

        assert_eq!(tx.category, Category::Trade);
        assert_eq!(tx.received_amount, "0,005");
        assert_eq!(tx.received_currency, "BTC");
        assert_eq!(tx.sent_amount, "100,00");
        assert_eq!(tx.sent_currency, "EUR");
        assert_eq!(tx.order_id, "NXT1");
        assert_eq!(tx.description, "approved / details");
        assert_eq!(tx.date_string(), "01.01.2023 12:00");
    }

    #[rstest]
    #[case::withdrawal("Withdrawal", Category::Withdrawal)]
    #[case::payment("Withdraw Exchanged", Category::Payment)]
    fn test_outgoing_types_only_send(#[case] kind: &str, #[case] category: Category) {
        let tx = NexoCsvParser
            .parse(&nexo_row(kind, ("USDC", "-25"), ("USDC", "-25")))
            .unwrap();

        assert_eq!(tx.category, category);
        assert_eq!(tx.received_amount, "");
        assert_eq!(tx.sent_amount, "25");
        assert_eq!(tx.sent_currency, "USDC");
    }

    #[rstest]
    #[case::cashback("Exchange Cashback", Category::Cashback)]
    #[case::interest("Fixed Term Interest", Category::OtherIncome)]
    #[case::deposit("Top up Crypto", Category::Deposit)]
    #[case::unknown("Airdrop Campaign", Category::Error)]
    fn test_incoming_types_receive_input(#[case] kind: &str, #[case] category: Category) {
        let tx = NexoCsvParser
            .parse(&nexo_row(kind, ("NEXO", "0.42"), ("NEXO", "0.42")))
            .unwrap();

        assert_eq!(tx.category, category);
        assert_eq!(tx.received_amount, "0,42");
        assert_eq!(tx.received_currency, "NEXO");
        assert_eq!(tx.sent_amount, "");
    }

    #[test]
    fn test_noise_type_is_skipped() {
        let tx = NexoCsvParser
            .parse(&nexo_row("Locking Term Deposit", ("NEXO", ""), ("", "")))
            .unwrap();
        assert!(tx.skip);
    }
}
