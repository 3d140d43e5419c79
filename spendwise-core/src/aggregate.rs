//! Monthly aggregator: groups normalized transactions by calendar month and
//! sums them into Needs / Wants / Other buckets.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::finance::{CategoryGroup, Transaction};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Grouping key. Orders chronologically.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1-12
    pub month: u32,
}

impl MonthKey {
    pub fn of(txn: &Transaction) -> Self {
        Self {
            year: txn.date.year(),
            month: txn.date.month(),
        }
    }

    /// Full month name and year, e.g. `August 2025`
    pub fn label(&self) -> String {
        let name = MONTH_NAMES
            .get(self.month.wrapping_sub(1) as usize)
            .copied()
            .unwrap_or("Unknown");
        format!("{} {:04}", name, self.year)
    }
}

/// Sums over a set of transactions. Used as-is for the overall aggregate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct SpendingTotals {
    /// Outflow sum minus inflow sum
    pub total_net: f64,
    pub needs_spent: f64,
    pub wants_spent: f64,
    /// Outflow of everything that is neither Needs nor Wants
    pub other_spent: f64,
}

impl SpendingTotals {
    pub fn add(&mut self, txn: &Transaction) {
        self.total_net += txn.net();
        match txn.group() {
            CategoryGroup::Needs => self.needs_spent += txn.outflow,
            CategoryGroup::Wants => self.wants_spent += txn.outflow,
            CategoryGroup::Other => self.other_spent += txn.outflow,
        }
    }

    /// Needs + Wants + Other, i.e. the outflow sum
    pub fn total_outflow(&self) -> f64 {
        self.needs_spent + self.wants_spent + self.other_spent
    }
}

/// Totals for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyAggregate {
    pub key: MonthKey,
    pub label: String,
    pub totals: SpendingTotals,
}

/// Totals over every transaction. All zeros for an empty slice.
pub fn summarize(txns: &[Transaction]) -> SpendingTotals {
    let mut totals = SpendingTotals::default();
    for txn in txns {
        totals.add(txn);
    }
    totals
}

/// One aggregate per month present, oldest first.
pub fn aggregate_by_month(txns: &[Transaction]) -> Vec<MonthlyAggregate> {
    let mut months: BTreeMap<MonthKey, SpendingTotals> = BTreeMap::new();

    for txn in txns {
        months.entry(MonthKey::of(txn)).or_default().add(txn);
    }

    months
        .into_iter()
        .map(|(key, totals)| {
            let label = key.label();
            tracing::debug!(
                month = %label,
                net = totals.total_net,
                needs = totals.needs_spent,
                wants = totals.wants_spent,
                other = totals.other_spent,
                "aggregated month"
            );
            MonthlyAggregate { key, label, totals }
        })
        .collect()
}
