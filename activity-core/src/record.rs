//! Exported transaction records and the per-run seen-set.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::format_amount;
use crate::date::format_iso;

/// One settled transaction as it appears in the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Section date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Payee text as rendered, unescaped
    pub payee: String,
    /// Positive = credit/refund, negative = debit
    pub amount: f64,
}

impl Record {
    pub fn new(date: NaiveDate, payee: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            payee: payee.into(),
            amount,
        }
    }

    pub fn iso_date(&self) -> String {
        format_iso(self.date)
    }

    pub fn amount_text(&self) -> String {
        format_amount(self.amount)
    }

    pub fn key(&self) -> DedupKey {
        DedupKey {
            date: self.iso_date(),
            payee: self.payee.clone(),
            amount: self.amount_text(),
        }
    }
}

/// Heuristic identity of a record: (date, raw payee, amount).
///
/// Two real transactions sharing all three collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub date: String,
    pub payee: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    Added,
    Duplicate,
}

/// Discovery-ordered records, at most one per [`DedupKey`].
#[derive(Debug, Default)]
pub struct RecordSet {
    seen: HashSet<DedupKey>,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: Record) -> Insertion {
        if self.seen.insert(record.key()) {
            self.records.push(record);
            Insertion::Added
        } else {
            Insertion::Duplicate
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
