//! Report assembler: per-month blocks followed by the overall block.

use serde::Serialize;

use crate::aggregate::{aggregate_by_month, summarize, MonthlyAggregate, SpendingTotals};
use crate::finance::RawTransaction;
use crate::normalize::{normalize, Normalized};
use crate::rules::{evaluate, Scope};

pub const OVERALL_HEADER: &str = "--- Overall Recommendations ---";

/// Everything computed for one report request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Report {
    pub months: Vec<MonthlyAggregate>,
    pub overall: SpendingTotals,
    pub monthly_income: f64,
    /// Rows excluded by the normalizer
    pub dropped_rows: usize,
    pub recommendations: Vec<String>,
}

fn month_block(month: &MonthlyAggregate, income: f64) -> Vec<String> {
    let t = &month.totals;
    let mut lines = vec![
        format!("--- {} ---", month.label),
        format!("Total Net Spent: ${:.2}", t.total_net),
        format!("Needs Spent: ${:.2}", t.needs_spent),
        format!("Wants Spent: ${:.2}", t.wants_spent),
        format!("Other Spent: ${:.2}", t.other_spent),
    ];
    lines.extend(evaluate(t, income, &Scope::Month(month.label.clone())));
    lines
}

/// Lay out the final string sequence.
pub fn assemble(months: &[MonthlyAggregate], overall: &SpendingTotals, income: f64) -> Vec<String> {
    let mut lines: Vec<String> = months.iter().flat_map(|m| month_block(m, income)).collect();
    lines.push(OVERALL_HEADER.to_string());
    lines.extend(evaluate(overall, income, &Scope::Overall));
    lines
}

/// Normalize, aggregate, evaluate and assemble.
pub fn generate_report(rows: &[RawTransaction], monthly_income: f64) -> Report {
    report_from_normalized(&normalize(rows), monthly_income)
}

/// Same as [`generate_report`] for rows that were already normalized.
pub fn report_from_normalized(normalized: &Normalized, monthly_income: f64) -> Report {
    let months = aggregate_by_month(&normalized.transactions);
    let overall = summarize(&normalized.transactions);
    let recommendations = assemble(&months, &overall, monthly_income);

    Report {
        months,
        overall,
        monthly_income,
        dropped_rows: normalized.dropped_count(),
        recommendations,
    }
}

/// The ordered recommendation lines for a set of raw rows.
pub fn evaluate_report(rows: &[RawTransaction], monthly_income: f64) -> Vec<String> {
    generate_report(rows, monthly_income).recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_only_overall_block() {
        let lines = evaluate_report(&[], 1000.0);
        assert_eq!(lines, vec![
            OVERALL_HEADER.to_string(),
            "Great job! Your spending on Needs and Wants is within the recommended 50/30 rule relative to your inflow.".to_string(),
            "You have a surplus of $1000.00 this month. Consider saving or investing this amount.".to_string(),
        ]);
    }

    #[test]
    fn test_month_block_layout() {
        let rows = vec![
            RawTransaction::new("08/01/2025", "Income", "$0.00", "$2000.00"),
            RawTransaction::new("08/05/2025", "Needs", "$1000.00", "$0.00"),
        ];
        let lines = evaluate_report(&rows, 2000.0);
        assert_eq!(&lines[..6], &[
            "--- August 2025 ---".to_string(),
            "Total Net Spent: $-1000.00".to_string(),
            "Needs Spent: $1000.00".to_string(),
            "Wants Spent: $0.00".to_string(),
            "Other Spent: $0.00".to_string(),
            "Info: In August 2025, your net spending ($-1000.00) was within your monthly inflow ($2000.00).".to_string(),
        ]);
        assert_eq!(lines[6], "Info: In August 2025, your Needs and Wants spending adhered to the 50/30 rule relative to your inflow.");
        assert_eq!(lines[7], OVERALL_HEADER);
    }

    #[test]
    fn test_dropped_rows_reported() {
        let rows = vec![
            RawTransaction::new("08/05/2025", "Needs", "$10.00", "$0.00"),
            RawTransaction::new("08/06/2025", "Needs", "???", "$0.00"),
        ];
        let report = generate_report(&rows, 100.0);
        assert_eq!(report.dropped_rows, 1);
        assert_eq!(report.overall.needs_spent, 10.0);
    }
}
