//! Plutus rewards export (pipe separated)
//!
//! Two generations of the export exist; the newer one renamed
//! `amount`, `statement_id` and `reference_type` to `reward_plu_value`,
//! `exchange_rate_id` and `description`. Both are accepted. Every reward is
//! paid in PLU and classified by its `type` column.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{parse_timestamp, required, signed_decimal_text, Side};
use crate::parser::{ExchangeParser, InputFormat};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use serde::Deserialize;

const DATE_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const REWARD_CURRENCY: &str = "PLU";

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[(
        Category::Cashback,
        &["DAILY_REBATE_DISTRIBUTION", "REBATE_BONUS"],
    )],
    noise: &[],
};

#[derive(Debug, Deserialize)]
struct PlutusRow {
    #[serde(rename = "createdAt")]
    created_at: String,
    #[serde(rename = "type")]
    reward_type: String,
    #[serde(rename = "amount", alias = "reward_plu_value")]
    amount: String,
    #[serde(rename = "statement_id", alias = "exchange_rate_id", default)]
    statement_id: String,
    #[serde(rename = "reference_type", alias = "description", default)]
    reference_type: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PlutusCsvParser;

impl ExchangeParser for PlutusCsvParser {
    fn name(&self) -> &'static str {
        "PlutusParserCsv"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::Csv {
            delimiter: b'|',
            skip_lines: 0,
        }
    }

    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError> {
        let row: PlutusRow = record.deserialize()?;
        let reward_type = row.reward_type.trim();
        let timestamp = parse_timestamp(&row.created_at, DATE_PATTERN, "createdAt")?;

        let tx = NormalizedTransaction::new(
            timestamp,
            TABLE.classify(reward_type),
            row.reference_type.trim(),
        );
        // Clawbacks show up as negative rewards
        let tx = match signed_decimal_text(required(&row.amount, "amount")?, "amount")? {
            Some((Side::Sent, amount)) => tx.with_sent(amount, REWARD_CURRENCY),
            Some((Side::Received, amount)) => tx.with_received(amount, REWARD_CURRENCY),
            None => tx,
        };

        Ok(tx
            .with_order_id(row.statement_id.trim())
            .with_skip(TABLE.is_noise(reward_type))
            .with_raw_input(record.render()))
    }
}
