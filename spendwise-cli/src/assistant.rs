//! Question answering over an uploaded dataset.
//!
//! The answering side is a capability: anything that can take the
//! conversation so far, a text snapshot of the data and a question, and
//! return an answer. [`LlmAnswerer`] is the HTTP-backed implementation.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::Datelike;
use spendwise_core::{aggregate_by_month, summarize, Transaction};

use crate::llm::{self, ChatTurn, LlmConfig};

pub const SYSTEM_PROMPT: &str = "You are a friendly and helpful AI assistant that can analyze spending habits from a CSV file. \
The data contains 'Date', 'Payee', 'Category Group', 'Category', 'Outflow', 'Inflow', 'Month', and 'Year' columns. \
When asked about dates, use the 'Date', 'Month', and 'Year' columns. \
Feel free to ask clarifying questions or offer further insights based on the data.";

/// Text rendering of a session's dataset, sent along with every question
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSnapshot {
    pub text: String,
    pub row_count: usize,
    pub truncated: bool,
}

impl DatasetSnapshot {
    pub fn new(txns: &[Transaction], monthly_income: f64, max_rows: usize) -> Result<Self> {
        let mut text = String::new();
        let overall = summarize(txns);

        writeln!(text, "Declared monthly income: ${monthly_income:.2}")?;
        writeln!(text, "Transactions: {}", txns.len())?;
        writeln!(
            text,
            "Overall: net ${:.2}, needs ${:.2}, wants ${:.2}, other ${:.2}",
            overall.total_net, overall.needs_spent, overall.wants_spent, overall.other_spent
        )?;

        for m in aggregate_by_month(txns) {
            writeln!(
                text,
                "{}: net ${:.2}, needs ${:.2}, wants ${:.2}, other ${:.2}",
                m.label, m.totals.total_net, m.totals.needs_spent, m.totals.wants_spent, m.totals.other_spent
            )?;
        }

        let shown = txns.len().min(max_rows);
        text.push('\n');
        text.push_str(&rows_csv(&txns[..shown])?);

        let truncated = shown < txns.len();
        if truncated {
            writeln!(text, "... {} more rows not shown", txns.len() - shown)?;
        }

        Ok(Self {
            text,
            row_count: txns.len(),
            truncated,
        })
    }
}

fn rows_csv(txns: &[Transaction]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["Date", "Payee", "Category Group", "Category", "Outflow", "Inflow", "Month", "Year"])?;
    for t in txns {
        wtr.write_record([
            t.date.format("%m/%d/%Y").to_string(),
            t.payee.clone().unwrap_or_default(),
            t.category_group.clone(),
            t.category.clone().unwrap_or_default(),
            format!("{:.2}", t.outflow),
            format!("{:.2}", t.inflow),
            t.date.month().to_string(),
            t.date.year().to_string(),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flush snapshot csv: {e}"))?;
    Ok(String::from_utf8(bytes)?)
}

#[allow(async_fn_in_trait)]
pub trait QuestionAnswerer {
    async fn ask(&self, history: &[ChatTurn], snapshot: &DatasetSnapshot, question: &str) -> Result<String>;
}

pub struct LlmAnswerer {
    config: LlmConfig,
}

impl LlmAnswerer {
    pub fn new(config: LlmConfig) -> Self {
        Self { config }
    }
}

impl QuestionAnswerer for LlmAnswerer {
    async fn ask(&self, history: &[ChatTurn], snapshot: &DatasetSnapshot, question: &str) -> Result<String> {
        let system = format!("{SYSTEM_PROMPT}\n\nDataset:\n{}", snapshot.text);
        let mut turns = history.to_vec();
        turns.push(ChatTurn::user(question));
        llm::chat_complete(&self.config, &system, &turns).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txns() -> Vec<Transaction> {
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        let mut rent = Transaction::new(d(8, 5), "Needs", 1000.0, 0.0);
        rent.payee = Some("Rent".to_string());
        rent.category = Some("Housing".to_string());
        vec![
            Transaction::new(d(7, 1), "Income", 0.0, 1500.0),
            rent,
            Transaction::new(d(8, 9), "Wants", 25.5, 0.0),
        ]
    }

    #[test]
    fn test_snapshot_lists_months_and_rows() {
        let snap = DatasetSnapshot::new(&txns(), 1500.0, 100).unwrap();
        assert_eq!(snap.row_count, 3);
        assert!(!snap.truncated);
        assert!(snap.text.contains("Declared monthly income: $1500.00"));
        assert!(snap.text.contains("July 2025: net $-1500.00"));
        assert!(snap.text.contains("August 2025: net $1025.50, needs $1000.00, wants $25.50"));
        assert!(snap.text.contains("Date,Payee,Category Group,Category,Outflow,Inflow,Month,Year"));
        assert!(snap.text.contains("08/05/2025,Rent,Needs,Housing,1000.00,0.00,8,2025"));
    }

    #[test]
    fn test_snapshot_truncates_rows() {
        let snap = DatasetSnapshot::new(&txns(), 1500.0, 1).unwrap();
        assert!(snap.truncated);
        assert!(snap.text.contains("... 2 more rows not shown"));
        assert!(!snap.text.contains("Rent"));
    }
}
