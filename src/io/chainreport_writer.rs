//! Chainreport output serialization
//!
//! Writes normalized transactions as `;`-delimited rows with the ten fixed
//! Chainreport columns. Formatting is pure: the same records always produce
//! byte-identical output.

use crate::types::{ConvertError, NormalizedTransaction};
use csv::{Writer, WriterBuilder};
use std::io::Write;

/// Column names of the Chainreport import format, in order
pub const CHAINREPORT_HEADER: [&str; 10] = [
    "Zeitpunkt",
    "Transaktions Typ",
    "Anzahl Eingang",
    "Währung Eingang",
    "Anzahl Ausgang",
    "Währung Ausgang",
    "Transaktionsgebühr",
    "Währung Transaktionsgebühr",
    "Oder-ID der Exchange",
    "Beschreibung",
];

const DELIMITER: u8 = b';';

/// Row-at-a-time Chainreport writer
pub struct ChainreportWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> ChainreportWriter<W> {
    pub fn new(output: W) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .from_writer(output);
        ChainreportWriter { writer }
    }

    /// Write the header row; call once per output file
    pub fn write_header(&mut self) -> Result<(), ConvertError> {
        self.writer.write_record(CHAINREPORT_HEADER)?;
        Ok(())
    }

    /// Write one transaction row
    pub fn write_transaction(&mut self, tx: &NormalizedTransaction) -> Result<(), ConvertError> {
        self.writer.write_record([
            tx.date_string().as_str(),
            tx.category.as_str(),
            tx.received_amount.as_str(),
            tx.received_currency.as_str(),
            tx.sent_amount.as_str(),
            tx.sent_currency.as_str(),
            tx.fee_amount.as_str(),
            tx.fee_currency.as_str(),
            tx.order_id.as_str(),
            tx.description.as_str(),
        ])?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ConvertError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a complete Chainreport file
///
/// # Arguments
///
/// * `transactions` - Records in output order
/// * `output` - Destination writer
///
/// # Errors
///
/// Returns an error if the output cannot be written or flushed.
pub fn write_chainreport(
    transactions: &[NormalizedTransaction],
    output: &mut dyn Write,
) -> Result<(), ConvertError> {
    let mut writer = ChainreportWriter::new(output);
    writer.write_header()?;
    for tx in transactions {
        writer.write_transaction(tx)?;
    }
    writer.flush()
}
