//! Coinbase transaction history
//!
//! The export starts with three preamble lines before the header row. Fiat
//! columns may carry a currency symbol (`€12.50`), which is stripped.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{
    nonzero_decimal_text, parse_timestamp, required, signed_decimal_text, strip_currency_symbol,
};
use crate::parser::{ExchangeParser, InputFormat};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use serde::Deserialize;

const DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S UTC";

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[
        (Category::Deposit, &["Deposit"]),
        (Category::Withdrawal, &["Send"]),
        (Category::Trade, &["Buy", "Sell"]),
        (Category::OtherIncome, &["Receive"]),
        (Category::Staking, &["Staking Income"]),
    ],
    noise: &[],
};

#[derive(Debug, Deserialize)]
struct CoinbaseRow {
    #[serde(rename = "ID", default)]
    id: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
    #[serde(rename = "Transaction Type")]
    kind: String,
    #[serde(rename = "Asset")]
    asset: String,
    #[serde(rename = "Quantity Transacted")]
    quantity: String,
    #[serde(rename = "Price Currency", default)]
    price_currency: String,
    #[serde(rename = "Subtotal", default)]
    subtotal: String,
    #[serde(rename = "Fees and/or Spread", default)]
    fees: String,
}

/// Plain point-decimal text: no currency symbol, no `,` thousands separators
fn export_amount(value: &str) -> String {
    strip_currency_symbol(value).replace(',', "")
}

/// Unsigned comma text of an export amount
fn unsigned_amount(value: &str, field: &str) -> Result<String, ConvertError> {
    Ok(signed_decimal_text(&export_amount(value), field)?
        .map(|(_, amount)| amount)
        .unwrap_or_default())
}

#[derive(Debug, Clone, Copy)]
pub struct CoinbaseCsvParser;

impl ExchangeParser for CoinbaseCsvParser {
    fn name(&self) -> &'static str {
        "CoinbaseParserCsv"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv {
            delimiter: b',',
            skip_lines: 3,
        }
    }

    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError> {
        let row: CoinbaseRow = record.deserialize()?;
        let kind = row.kind.trim();
        let timestamp = parse_timestamp(&row.timestamp, DATE_PATTERN, "Timestamp")?;

        let asset = row.asset.trim();
        let fiat = row.price_currency.trim();
        let quantity = unsigned_amount(
            required(&row.quantity, "Quantity Transacted")?,
            "Quantity Transacted",
        )?;
        let subtotal = unsigned_amount(&row.subtotal, "Subtotal")?;

        let tx = NormalizedTransaction::new(timestamp, TABLE.classify(kind), kind);
        let tx = if kind.eq_ignore_ascii_case("Buy") {
            tx.with_received(quantity, asset).with_sent(subtotal, fiat)
        } else if kind.eq_ignore_ascii_case("Sell") {
            tx.with_received(subtotal, fiat).with_sent(quantity, asset)
        } else if kind.eq_ignore_ascii_case("Send") {
            tx.with_sent(quantity, asset)
        } else {
            tx.with_received(quantity, asset)
        };

        let fee = nonzero_decimal_text(&export_amount(&row.fees), "Fees and/or Spread")?;
        let tx = if fee.is_empty() {
            tx
        } else {
            tx.with_fee(fee, fiat)
        };

        Ok(tx
            .with_order_id(row.id.trim())
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

    const HEADER: [&str; 8] = [
        "ID",
        "Timestamp",
        "Transaction Type",
        "Asset",
        "Quantity Transacted",
        "Price Currency",
        "Subtotal",
        "Fees and/or Spread",
    ];

    fn coinbase_row(kind: &str, quantity: &str, subtotal: &str, fees: &str) -> RawRecord {
        RawRecord::row(
            Rc::new(StringRecord::from(HEADER.to_vec())),
            StringRecord::from(vec![
                "cb-1",
                "2022-01-01 12:00:00 UTC",
                kind,
                "BTC",
                quantity,
                "EUR",
                subtotal,
                fees,
            ]),
        )
    }

    #[test]
    fn test_buy() {
        let tx = CoinbaseCsvParser
            .parse(&coinbase_row("Buy", "0.001", "€40.00", "€1.49"))
            .unwrap();

        assert_eq!(tx.category, Category::Trade);
        assert_eq!(tx.date_string(), "01.01.2022 12:00");
        assert_eq!(tx.received_amount, "0,001");
        assert_eq!(tx.received_currency, "BTC");
        assert_eq!(tx.sent_amount, "40,00");
        assert_eq!(tx.sent_currency, "EUR");
        assert_eq!(tx.fee_amount, "1,49");
        assert_eq!(tx.fee_currency, "EUR");
        assert_eq!(tx.order_id, "cb-1");
    }

    #[test]
    fn test_sell_reverses_legs() {
        let tx = CoinbaseCsvParser
            .parse(&coinbase_row("Sell", "-0.002", "80.00", "0"))
            .unwrap();

        assert_eq!(tx.received_amount, "80,00");
        assert_eq!(tx.received_currency, "EUR");
        assert_eq!(tx.sent_amount, "0,002");
        assert_eq!(tx.sent_currency, "BTC");
        assert_eq!(tx.fee_amount, "");
    }

    #[rstest]
    #[case::symbol("€40.00", "40.00")]
    #[case::thousands_with_symbol("€1,234.56", "1234.56")]
    #[case::thousands("10,500", "10500")]
    #[case::negative_after_symbol("€-5", "-5")]
    fn test_export_amount(#[case] value: &str, #[case] expected: &str) {
        assert_eq!(export_amount(value), expected);
    }

    #[rstest]
    #[case::thousands_with_symbol("€1,234.56", "1234,56")]
    #[case::thousands("10,500", "10500")]
    #[case::plain("€40.00", "40,00")]
    fn test_buy_subtotal_with_thousands_separator(#[case] subtotal: &str, #[case] expected: &str) {
        let tx = CoinbaseCsvParser
            .parse(&coinbase_row("Buy", "0.5", subtotal, "€1,002.50"))
            .unwrap();

        assert_eq!(tx.sent_amount, expected);
        assert_eq!(tx.sent_currency, "EUR");
        assert_eq!(tx.fee_amount, "1002,50");
    }

    #[rstest]
    #[case::send("Send", Category::Withdrawal, false)]
    #[case::receive("Receive", Category::OtherIncome, true)]
    #[case::staking("Staking Income", Category::Staking, true)]
    #[case::deposit("Deposit", Category::Deposit, true)]
    #[case::unknown("Advanced Trade Buy", Category::Error, true)]
    fn test_single_leg_types(
        #[case] kind: &str,
        #[case] category: Category,
        #[case] received: bool,
    ) {
        let tx = CoinbaseCsvParser
            .parse(&coinbase_row(kind, "0.5", "", ""))
            .unwrap();

        assert_eq!(tx.category, category);
        assert_eq!(tx.has_received(), received);
        assert_eq!(tx.has_sent(), !received);
    }

    #[test]
    fn test_export_without_id_column() {
        let headers: Vec<&str> = HEADER[1..].to_vec();
        let record = RawRecord::row(
            Rc::new(StringRecord::from(headers)),
            StringRecord::from(vec![
                "2022-01-01 12:00:00 UTC",
                "Receive",
                "ETH",
                "0.1",
                "EUR",
                "",
                "",
            ]),
        );
        let tx = CoinbaseCsvParser.parse(&record).unwrap();
        assert_eq!(tx.order_id, "");
    }
}
