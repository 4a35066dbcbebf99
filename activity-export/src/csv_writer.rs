//! Delimited-text export.
//!
//! ```text
//! Date,Payee,Amount
//! 2026-10-17,"Coffee Shop",-4.5
//! 2026-10-17,"Employer Inc",2000
//! ```
//!
//! The payee is always quote-wrapped with embedded quotes doubled; date and
//! amount never need quoting, so the writer runs with quoting disabled and
//! the payee is escaped up front.

use activity_core::Record;
use anyhow::{Context, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

pub const CSV_HEADER: [&str; 3] = ["Date", "Payee", "Amount"];

/// `Bob's "Diner"` -> `"Bob's ""Diner"""`
pub fn escape_payee(raw: &str) -> String {
    format!("\"{}\"", raw.replace('"', "\"\""))
}

/// Serialize records in the order given.
pub fn to_csv(records: &[Record]) -> Result<Vec<u8>> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADER).context("write csv header")?;
    for record in records {
        wtr.write_record([
            record.iso_date(),
            escape_payee(&record.payee),
            record.amount_text(),
        ])
        .with_context(|| format!("write csv row for {}", record.payee))?;
    }

    wtr.into_inner()
        .map_err(|e| anyhow::anyhow!("flush csv buffer: {}", e.error()))
}
