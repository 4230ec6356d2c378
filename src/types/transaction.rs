//! Normalized transaction types for the Chainreport converter
//!
//! Every exchange adapter maps its own row or line schema onto
//! [`NormalizedTransaction`]. All amount and currency fields are already
//! presentation-ready strings (comma decimal separator); only the timestamp is
//! kept as a typed value until it is rendered by the writer.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Output rendering of the timestamp column
pub const CHAINREPORT_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Transaction categories understood by Chainreport
///
/// The set is closed. Descriptions that no classification table knows about
/// end up as [`Category::Error`], which is still written so the operator can
/// fix the line by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Deposit,
    Withdrawal,
    Trade,
    Cashback,
    Staking,
    ReferralRewards,
    Payment,
    Airdrop,
    OtherIncome,
    Fee,
    /// Cancels the withdrawal directly before it
    Cancel,
    /// Unknown source description
    Error,
}

impl Category {
    /// The exact label written to the "Transaktions Typ" column
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Deposit => "Deposit",
            Category::Withdrawal => "Withdrawal",
            Category::Trade => "Trade",
            Category::Cashback => "Cashback",
            Category::Staking => "Staking",
            Category::ReferralRewards => "Referral_Rewards",
            Category::Payment => "Payment",
            Category::Airdrop => "Airdrop",
            Category::OtherIncome => "Other_Income",
            Category::Fee => "Fee",
            Category::Cancel => "Cancel",
            Category::Error => "ERROR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One transaction in Chainreport terms
///
/// Built once by an adapter through the `with_*` methods and never mutated
/// afterwards; the merge engine creates a new record when it joins two halves
/// of a split trade.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransaction {
    /// Point in time of the transaction (exchange local, usually UTC)
    pub timestamp: NaiveDateTime,

    /// Semantic category derived from the source description
    pub category: Category,

    /// Asset quantity gained, comma decimal separator, or empty
    pub received_amount: String,

    /// Asset gained, or empty
    pub received_currency: String,

    /// Asset quantity given up, comma decimal separator, or empty
    pub sent_amount: String,

    /// Asset given up, or empty
    pub sent_currency: String,

    /// Fee charged, comma decimal separator, or empty
    pub fee_amount: String,

    /// Currency of the fee, or empty
    pub fee_currency: String,

    /// Exchange-assigned identifier (order id, tx hash), or empty
    pub order_id: String,

    /// Source description, kept for the audit column and error reports
    pub description: String,

    /// True for noise lines that never reach the output
    pub skip: bool,

    /// Textual rendering of the source unit, used in error messages
    pub raw_input: String,
}

impl NormalizedTransaction {
    /// Create a record with all leg, fee and id fields empty
    pub fn new(timestamp: NaiveDateTime, category: Category, description: impl Into<String>) -> Self {
        NormalizedTransaction {
            timestamp,
            category,
            received_amount: String::new(),
            received_currency: String::new(),
            sent_amount: String::new(),
            sent_currency: String::new(),
            fee_amount: String::new(),
            fee_currency: String::new(),
            order_id: String::new(),
            description: description.into(),
            skip: false,
            raw_input: String::new(),
        }
    }

    pub fn with_received(mut self, amount: impl Into<String>, currency: impl Into<String>) -> Self {
        self.received_amount = amount.into();
        self.received_currency = currency.into();
        self
    }

    pub fn with_sent(mut self, amount: impl Into<String>, currency: impl Into<String>) -> Self {
        self.sent_amount = amount.into();
        self.sent_currency = currency.into();
        self
    }

    pub fn with_fee(mut self, amount: impl Into<String>, currency: impl Into<String>) -> Self {
        self.fee_amount = amount.into();
        self.fee_currency = currency.into();
        self
    }

    pub fn with_order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = order_id.into();
        self
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_raw_input(mut self, raw_input: impl Into<String>) -> Self {
        self.raw_input = raw_input.into();
        self
    }

    /// Timestamp rendered as `dd.mm.yyyy hh:mm`
    pub fn date_string(&self) -> String {
        self.timestamp.format(CHAINREPORT_DATE_FORMAT).to_string()
    }

    /// True if the received leg carries a non-zero quantity
    pub fn has_received(&self) -> bool {
        is_nonzero_amount(&self.received_amount)
    }

    /// True if the sent leg carries a non-zero quantity
    pub fn has_sent(&self) -> bool {
        is_nonzero_amount(&self.sent_amount)
    }

    /// True if a non-zero fee is reported
    pub fn has_fee(&self) -> bool {
        is_nonzero_amount(&self.fee_amount)
    }
}

/// Parse an amount written with either a point or a comma separator
///
/// Accepts plain and scientific notation (`1e-8`), which some ledgers use
/// for dust amounts.
pub fn decimal_value(text: &str) -> Option<Decimal> {
    let normalized = text.trim().replace(',', ".");
    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .ok()
}

/// Empty or numerically zero amounts do not count as a leg
///
/// Text that is not a number is treated as present, so it still reaches the
/// output for the operator to look at.
pub fn is_nonzero_amount(amount: &str) -> bool {
    if amount.trim().is_empty() {
        return false;
    }
    decimal_value(amount).map_or(true, |value| !value.is_zero())
}
