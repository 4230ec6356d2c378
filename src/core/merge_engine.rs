//! Merge and reconciliation engine
//!
//! Consumes normalized records one at a time, in input order, and decides for
//! each one whether to hold it, join it with a held record, emit it or drop
//! it. It also keeps the run's [`ConversionStatistics`].
//!
//! # States
//!
//! - `Idle`: nothing held
//! - `TradeFirstHalf`: the first line of a two-line trade is waiting for its
//!   second line
//! - `Withdrawal`: a withdrawal is waiting to see whether the next line
//!   cancels it
//!
//! At most one record is held at any time. Which states are reachable is
//! decided by the format's [`MergeRules`].

use crate::core::reporter::Reporter;
use crate::parser::MergeRules;
use crate::types::{Category, ConversionStatistics, NormalizedTransaction};
use log::debug;
use std::mem;

#[derive(Debug, Default)]
enum Pending {
    #[default]
    Idle,
    TradeFirstHalf(NormalizedTransaction),
    Withdrawal(NormalizedTransaction),
}

/// Single-pass state machine joining split records
#[derive(Debug)]
pub struct MergeEngine {
    rules: MergeRules,
    pending: Pending,
    stats: ConversionStatistics,
}

impl MergeEngine {
    /// Create an idle engine with zeroed statistics
    pub fn new(rules: MergeRules) -> Self {
        MergeEngine {
            rules,
            pending: Pending::Idle,
            stats: ConversionStatistics::default(),
        }
    }

    /// Statistics collected so far
    pub fn statistics(&self) -> &ConversionStatistics {
        &self.stats
    }

    /// Feed one record, returning the records that are ready for output
    ///
    /// Returns at most two records: a held withdrawal released by a
    /// non-cancel record, followed by the record itself.
    pub fn process(
        &mut self,
        tx: NormalizedTransaction,
        reporter: &mut Reporter<'_>,
    ) -> Vec<NormalizedTransaction> {
        self.stats.input_linecount += 1;
        let mut ready = Vec::new();

        if tx.skip {
            debug!("Skipping noise record '{}'", tx.description);
            self.stats.ignored += 1;
            return ready;
        }

        match mem::take(&mut self.pending) {
            Pending::Idle => self.route(tx, &mut ready, reporter),
            Pending::TradeFirstHalf(first) => {
                if self.opens_trade(&tx) && first.has_received() == tx.has_received() {
                    self.report_dangling(&first, reporter);
                    debug!("Holding new trade first half '{}'", tx.description);
                    self.pending = Pending::TradeFirstHalf(tx);
                } else {
                    debug!("Joining trade halves '{}' and '{}'", first.description, tx.description);
                    let combined = combine_trade_halves(&first, &tx);
                    self.emit(combined, &mut ready, reporter);
                }
            }
            Pending::Withdrawal(withdrawal) => {
                if tx.category == Category::Cancel {
                    debug!("Withdrawal '{}' was cancelled", withdrawal.description);
                    self.stats.ignored += 2;
                } else {
                    self.emit_unconfirmed(withdrawal, &mut ready, reporter);
                    self.route(tx, &mut ready, reporter);
                }
            }
        }

        ready
    }

    /// Resolve whatever is still held at end of input
    ///
    /// A held withdrawal is released with a warning; a held trade half has no
    /// counterpart and is reported as an error without being emitted.
    pub fn finish(
        mut self,
        reporter: &mut Reporter<'_>,
    ) -> (Vec<NormalizedTransaction>, ConversionStatistics) {
        let mut ready = Vec::new();
        match mem::take(&mut self.pending) {
            Pending::Idle => {}
            Pending::TradeFirstHalf(first) => self.report_dangling(&first, reporter),
            Pending::Withdrawal(withdrawal) => {
                self.emit_unconfirmed(withdrawal, &mut ready, reporter)
            }
        }
        (ready, self.stats)
    }

    fn opens_trade(&self, tx: &NormalizedTransaction) -> bool {
        self.rules.split_trades && tx.category == Category::Trade
    }

    /// Handle a record arriving while nothing is held
    fn route(
        &mut self,
        tx: NormalizedTransaction,
        ready: &mut Vec<NormalizedTransaction>,
        reporter: &mut Reporter<'_>,
    ) {
        match tx.category {
            Category::Trade if self.rules.split_trades => {
                debug!("Holding trade first half '{}'", tx.description);
                self.pending = Pending::TradeFirstHalf(tx);
            }
            Category::Withdrawal if self.rules.confirm_withdrawals => {
                debug!("Holding withdrawal '{}' until the next line", tx.description);
                self.pending = Pending::Withdrawal(tx);
            }
            Category::Cancel => {
                self.stats.warnings += 1;
                self.stats.ignored += 1;
                reporter.report(&format!(
                    "Ignoring a cancel line without a withdrawal before it:\n{}",
                    tx.raw_input
                ));
            }
            _ => self.emit(tx, ready, reporter),
        }
    }

    fn emit(
        &mut self,
        tx: NormalizedTransaction,
        ready: &mut Vec<NormalizedTransaction>,
        reporter: &mut Reporter<'_>,
    ) {
        self.stats.output_linecount += 1;
        if tx.category == Category::Error {
            self.stats.errors += 1;
            reporter.report(&format!(
                "Please report line {}\n{}\nThis has to be fixed.",
                self.stats.output_linecount, tx.raw_input
            ));
        }
        ready.push(tx);
    }

    /// Emit a withdrawal no cancel line followed
    fn emit_unconfirmed(
        &mut self,
        withdrawal: NormalizedTransaction,
        ready: &mut Vec<NormalizedTransaction>,
        reporter: &mut Reporter<'_>,
    ) {
        self.emit(withdrawal, ready, reporter);
        self.stats.warnings += 1;
        reporter.report(&format!(
            "Please fix the line {}. The amount is 0 in the export file.",
            self.stats.output_linecount
        ));
    }

    fn report_dangling(&mut self, half: &NormalizedTransaction, reporter: &mut Reporter<'_>) {
        self.stats.errors += 1;
        reporter.report(&format!(
            "Trade line without a second half, nothing was written for it:\n{}\nThis has to be fixed.",
            half.raw_input
        ));
    }
}

/// Join the two lines of a split trade into one record
///
/// The received leg comes from whichever half has a non-zero received amount
/// (the first half when both or neither do); the sent leg comes from the other
/// half. The fee is taken from the first half reporting a non-zero one.
/// Timestamp, category, order id and description come from the first half.
pub fn combine_trade_halves(
    first: &NormalizedTransaction,
    second: &NormalizedTransaction,
) -> NormalizedTransaction {
    let (receiving, sending) = if first.has_received() || !second.has_received() {
        (first, second)
    } else {
        (second, first)
    };
    let fee_source = if first.has_fee() || !second.has_fee() {
        first
    } else {
        second
    };

    NormalizedTransaction {
        received_amount: receiving.received_amount.clone(),
        received_currency: receiving.received_currency.clone(),
        sent_amount: sending.sent_amount.clone(),
        sent_currency: sending.sent_currency.clone(),
        fee_amount: fee_source.fee_amount.clone(),
        fee_currency: fee_source.fee_currency.clone(),
        skip: false,
        raw_input: format!("{}\n{}", first.raw_input, second.raw_input),
        ..first.clone()
    }
}
