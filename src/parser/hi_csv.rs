//! Hi app CSV export
//!
//! Columns: `Date, Description, Received Amount, Received Currency,
//! Sent Amount, Sent Currency, Fee Amount, Fee Currency, TxHash`.
//! Hi writes trades as two lines (one per leg) and shows withdrawals that were
//! later cancelled, so both merge rules are enabled.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{decimal_text, parse_timestamp};
use crate::parser::{ExchangeParser, InputFormat, MergeRules};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use serde::Deserialize;

pub(crate) const HI_DATE_PATTERN: &str = "%Y-%m-%d %H:%M UTC";

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[
        (Category::Cashback, &["HI rebate"]),
        (Category::Staking, &["Crypto staking yields （HI）"]),
        (
            Category::Deposit,
            &["Crypto deposit", "crypto receive", "Crypto purchase"],
        ),
        (Category::Withdrawal, &["crypto send", "Crypto withdraw"]),
        (Category::Trade, &["buy Vault HI", "buy HI paid", "Dust to HI"]),
        (Category::Payment, &["convert"]),
        (Category::Airdrop, &[]),
        (Category::Cancel, &["Crypto cancel withdraw"]),
        (Category::OtherIncome, &["Yields", "crypto cashhash redeem"]),
        (
            Category::ReferralRewards,
            &["HI referrer reward", "HI referrer rebate"],
        ),
    ],
    noise: &[
        "Vault HI daily release",
        "Crypto earning stake",
        "Crypto earning release",
        "Card refund",
        "Card consume",
        "Fiat deposit（IBAN）",
        "Fiat withdraw (IBAN)",
        "Fiat deposit （BankTransfer）",
        "Yields",
        "crypto transfer to trading",
        "crypto transfer to flexible",
    ],
};

#[derive(Debug, Deserialize)]
struct HiCsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Received Amount", default)]
    received_amount: String,
    #[serde(rename = "Received Currency", default)]
    received_currency: String,
    #[serde(rename = "Sent Amount", default)]
    sent_amount: String,
    #[serde(rename = "Sent Currency", default)]
    sent_currency: String,
    #[serde(rename = "Fee Amount", default)]
    fee_amount: String,
    #[serde(rename = "Fee Currency", default)]
    fee_currency: String,
    #[serde(rename = "TxHash", default)]
    tx_hash: String,
}

#[derive(Debug, Clone, Copy)]
pub struct HiCsvParser;

impl ExchangeParser for HiCsvParser {
    fn name(&self) -> &'static str {
        "HiParserCsv"
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
            confirm_withdrawals: true,
        }
    }

    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError> {
        let row: HiCsvRow = record.deserialize()?;
        let description = row.description.trim();
        let timestamp = parse_timestamp(&row.date, HI_DATE_PATTERN, "Date")?;

        Ok(
            NormalizedTransaction::new(timestamp, TABLE.classify(description), description)
                .with_received(
                    decimal_text(&row.received_amount, "Received Amount")?,
                    row.received_currency.trim(),
                )
                .with_sent(
                    decimal_text(&row.sent_amount, "Sent Amount")?,
                    row.sent_currency.trim(),
                )
                .with_fee(
                    decimal_text(&row.fee_amount, "Fee Amount")?,
                    row.fee_currency.trim(),
                )
                .with_order_id(row.tx_hash.trim())
                .with_skip(TABLE.is_noise(description))
                .with_raw_input(record.render()),
        )
    }
}
