//! Chainreport Converter Library
//! # Overview
//!
//! Converts transaction exports from crypto exchanges and wallets into the
//! Chainreport import format, a `;`-delimited file with ten fixed columns.
//!
//! # Architecture
//!
//! - [`types`] - Normalized transaction, categories, statistics and errors
//! - [`parser`] - One adapter per export format, selected through [`parser::ParserType`]
//! - [`io`] - CSV and PDF statement readers, Chainreport writer
//! - [`core`] - Merge engine, operator reporter and the [`core::Converter`]
//! - [`strategy`] - Per-input-format processing pipelines
//! - [`cli`] - CLI arguments parsing
//!
//! # Pipeline
//!
//! Each input record is parsed into a [`types::NormalizedTransaction`] and
//! handed to the [`core::MergeEngine`], which joins trades split across two
//! lines, drops withdrawals cancelled by the following line, and discards
//! noise. Everything it releases is written in input order.

pub mod cli;
pub mod core;
pub mod io;
pub mod parser;
pub mod strategy;
pub mod types;

pub use core::{Converter, MergeEngine};
pub use io::write_chainreport;
pub use parser::{ExchangeParser, ParserType};
pub use strategy::ConverterConfig;
pub use types::{Category, ConversionStatistics, ConvertError, NormalizedTransaction};
