//! Field conversions shared by the parsers
//!
//! Amounts arrive with a point separator and leave with a comma. The numeric
//! value is validated with `rust_decimal`, but the output is the source text
//! with the separator swapped, so no precision or formatting is lost.

use crate::types::transaction::decimal_value;
use crate::types::ConvertError;
use chrono::NaiveDateTime;

/// Which leg of a transaction a signed amount belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Received,
    Sent,
}

/// Return the trimmed value, or `MissingField` if it is blank
pub fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ConvertError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConvertError::missing_field(field));
    }
    Ok(value)
}

/// Parse a timestamp with a chrono pattern
///
/// # Errors
///
/// `MissingField` for a blank value, `InvalidDate` if the value does not match
/// `pattern`.
pub fn parse_timestamp(
    value: &str,
    pattern: &str,
    field: &str,
) -> Result<NaiveDateTime, ConvertError> {
    let value = required(value, field)?;
    NaiveDateTime::parse_from_str(value, pattern)
        .map_err(|_| ConvertError::invalid_date(field, value, pattern))
}

/// Validate an optional amount and render it with a comma separator
///
/// Blank input yields an empty string.
pub fn decimal_text(value: &str, field: &str) -> Result<String, ConvertError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    if decimal_value(value).is_none() {
        return Err(ConvertError::invalid_amount(field, value));
    }
    Ok(value.replace('.', ","))
}

/// Like [`decimal_text`], but zero amounts render empty
pub fn nonzero_decimal_text(value: &str, field: &str) -> Result<String, ConvertError> {
    let text = decimal_text(value, field)?;
    match decimal_value(&text) {
        Some(amount) if amount.is_zero() => Ok(String::new()),
        _ => Ok(text),
    }
}

/// Split a signed amount into its leg and unsigned comma text
///
/// A leading `-` means the amount was given up. Blank input yields `None`.
pub fn signed_decimal_text(
    value: &str,
    field: &str,
) -> Result<Option<(Side, String)>, ConvertError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let (side, magnitude) = match value.strip_prefix('-') {
        Some(rest) => (Side::Sent, rest.trim_start()),
        None => (Side::Received, value.strip_prefix('+').unwrap_or(value)),
    };
    if decimal_value(magnitude).is_none() {
        return Err(ConvertError::invalid_amount(field, value));
    }
    Ok(Some((side, magnitude.replace('.', ","))))
}

/// Drop the leading currency symbol some exports put in front of fiat amounts
///
/// `€1.50` becomes `1.50`; the sign may sit on either side of the symbol, so
/// `-$3` and `€-3` both become `-3`.
pub fn strip_currency_symbol(value: &str) -> String {
    let value = value.trim();
    let start = value
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(value.len());
    let (prefix, digits) = value.split_at(start);
    let sign = if prefix.contains('-') { "-" } else { "" };
    format!("{sign}{digits}")
}
