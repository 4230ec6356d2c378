//! Hi monthly statement (PDF)
//!
//! Transaction lines look like `2023-01-31 23:59 UTC buy HI paid -50 EUR`.
//! The line is split positionally into date, description, amount and
//! currency; a leading `-` on the amount puts it on the sent leg. The
//! statement has no fees and no order ids.

use crate::io::RawRecord;
use crate::parser::classification::ClassificationTable;
use crate::parser::fields::{parse_timestamp, signed_decimal_text, Side};
use crate::parser::hi_csv::HI_DATE_PATTERN;
use crate::parser::{ExchangeParser, InputFormat, MergeRules};
use crate::types::{Category, ConvertError, NormalizedTransaction};
use regex::Regex;
use std::sync::OnceLock;

static TABLE: ClassificationTable = ClassificationTable {
    categories: &[
        (Category::Cashback, &["HI rebate"]),
        (Category::Staking, &["Crypto staking yields HI"]),
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
        "Fiat depositIBAN",
        "Fiat withdraw (IBAN)",
        "Fiat deposit BankTransfer",
        "crypto transfer to trading",
        "crypto transfer to flexible",
    ],
};

fn line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<date>\d{4}-\d{2}-\d{2} \d{2}:\d{2} UTC) (?P<description>[/a-zA-Z ()]+?) (?P<amount>-?\d+(?:\.\d+)?) (?P<currency>\w+)$",
        )
        .expect("statement line regex is valid")
    })
}

#[derive(Debug, Clone, Copy)]
pub struct HiPdfParser;

impl ExchangeParser for HiPdfParser {
    fn name(&self) -> &'static str {
        "HiParserPdf"
    }

    fn input_format(&self) -> InputFormat {
        InputFormat::PdfText
    }

    fn merge_rules(&self) -> MergeRules {
        MergeRules {
            split_trades: true,
            confirm_withdrawals: true,
        }
    }

    fn parse(&self, record: &RawRecord) -> Result<NormalizedTransaction, ConvertError> {
        let line = record.as_line()?.trim();
        let captures = line_regex()
            .captures(line)
            .ok_or_else(|| ConvertError::unmatched_line(line))?;

        let description = captures["description"].trim();
        let timestamp = parse_timestamp(&captures["date"], HI_DATE_PATTERN, "date")?;
        let currency = &captures["currency"];

        let tx = NormalizedTransaction::new(timestamp, TABLE.classify(description), description);
        let tx = match signed_decimal_text(&captures["amount"], "amount")? {
            Some((Side::Sent, amount)) => tx.with_sent(amount, currency),
            Some((Side::Received, amount)) => tx.with_received(amount, currency),
            None => tx,
        };

        Ok(tx
            .with_skip(TABLE.is_noise(description))
            .with_raw_input(line))
    }
}
