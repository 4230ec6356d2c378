//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: the normalized transaction record and its categories
//! - `statistics`: per-run counters and the operator summary
//! - `error`: Error types for the converter

pub mod error;
pub mod statistics;
pub mod transaction;

pub use error::ConvertError;
pub use statistics::ConversionStatistics;
pub use transaction::{Category, NormalizedTransaction};
