//! Transaction types for budget exports, before and after normalization

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A transaction row as it comes out of the export, all fields still text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawTransaction {
    /// `MM/DD/YYYY`
    pub date: String,
    pub category_group: String,
    /// Currency string, e.g. `$1,200.00`
    pub outflow: String,
    pub inflow: String,
    pub category: Option<String>,
    pub payee: Option<String>,
}

impl RawTransaction {
    pub fn new(
        date: impl Into<String>,
        category_group: impl Into<String>,
        outflow: impl Into<String>,
        inflow: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category_group: category_group.into(),
            outflow: outflow.into(),
            inflow: inflow.into(),
            category: None,
            payee: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }
}

/// Budget bucket a transaction's category group falls into
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    #[serde(rename = "needs")]
    Needs,
    #[serde(rename = "wants")]
    Wants,
    #[serde(rename = "other")]
    Other,
}

impl CategoryGroup {
    /// Exact, case-sensitive match on the export's label.
    /// Anything that is not literally `Needs` or `Wants` counts as other.
    pub fn from_label(label: &str) -> Self {
        match label {
            "Needs" => CategoryGroup::Needs,
            "Wants" => CategoryGroup::Wants,
            _ => CategoryGroup::Other,
        }
    }
}

/// A normalized transaction: numeric amounts, a real date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Label as written in the export
    pub category_group: String,
    /// Money leaving the account, never negative
    pub outflow: f64,
    /// Money entering the account, never negative
    pub inflow: f64,
    pub category: Option<String>,
    pub payee: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, category_group: impl Into<String>, outflow: f64, inflow: f64) -> Self {
        Self {
            date,
            category_group: category_group.into(),
            outflow,
            inflow,
            category: None,
            payee: None,
        }
    }

    pub fn group(&self) -> CategoryGroup {
        CategoryGroup::from_label(&self.category_group)
    }

    /// Outflow minus inflow
    pub fn net(&self) -> f64 {
        self.outflow - self.inflow
    }
}
