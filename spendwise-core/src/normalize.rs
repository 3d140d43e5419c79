//! Record normalizer: currency strings and `MM/DD/YYYY` dates into typed values.
//!
//! Rows that fail on any field are filtered out as a whole and reported back
//! in [`Normalized::dropped`], so callers can audit what was left behind.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use crate::finance::{RawTransaction, Transaction};

static NON_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.]").expect("static regex"));

// chrono's `%Y` takes any number of digits; the year must be exactly four.
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").expect("static regex"));

/// Which field made a row unusable
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum DropReason {
    #[serde(rename = "outflow")]
    Outflow,
    #[serde(rename = "inflow")]
    Inflow,
    #[serde(rename = "date")]
    Date,
}

/// A row excluded from the normalized set
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DroppedRow {
    /// Position in the raw input
    pub index: usize,
    pub reason: DropReason,
}

/// Output of [`normalize`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub transactions: Vec<Transaction>,
    pub dropped: Vec<DroppedRow>,
}

impl Normalized {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Strip everything but digits and `.`, then parse.
///
/// `"$1,200.00"` is `1200.0`. A sign is stripped too, so `"-$5"` is `5.0`.
pub fn parse_amount(s: &str) -> Option<f64> {
    let cleaned = NON_NUMERIC.replace_all(s, "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse `MM/DD/YYYY`. No fallback formats.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !DATE_SHAPE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%m/%d/%Y").ok()
}

fn normalize_row(raw: &RawTransaction) -> Result<Transaction, DropReason> {
    let outflow = parse_amount(&raw.outflow).ok_or(DropReason::Outflow)?;
    let inflow = parse_amount(&raw.inflow).ok_or(DropReason::Inflow)?;
    let date = parse_date(&raw.date).ok_or(DropReason::Date)?;

    Ok(Transaction {
        date,
        category_group: raw.category_group.clone(),
        outflow,
        inflow,
        category: raw.category.clone(),
        payee: raw.payee.clone(),
    })
}

/// Normalize every row, keeping input order.
pub fn normalize(rows: &[RawTransaction]) -> Normalized {
    let mut out = Normalized::default();

    for (index, raw) in rows.iter().enumerate() {
        match normalize_row(raw) {
            Ok(txn) => out.transactions.push(txn),
            Err(reason) => {
                tracing::debug!(index, ?reason, "dropping unparseable row");
                out.dropped.push(DroppedRow { index, reason });
            }
        }
    }

    if !out.dropped.is_empty() {
        tracing::warn!(
            dropped = out.dropped.len(),
            kept = out.transactions.len(),
            "some rows could not be parsed and were excluded"
        );
    }

    out
}
