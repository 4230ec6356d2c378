//! Core conversion logic
//!
//! - `merge_engine` - State machine joining split records, with run statistics
//! - `reporter` - Operator message sink around the optional logging callback
//! - `converter` - Run orchestration and the end-of-run summary

pub mod converter;
pub mod merge_engine;
pub mod reporter;

pub use converter::Converter;
pub use merge_engine::{combine_trade_halves, MergeEngine};
pub use reporter::Reporter;
