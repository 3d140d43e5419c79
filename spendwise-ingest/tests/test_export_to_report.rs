use spendwise_core::{evaluate_report, generate_report};
use spendwise_ingest::read_export;

const AUGUST: &str = "
Account,Flag,Date,Payee,Category Group/Category,Category Group,Category,Memo,Outflow,Inflow,Cleared
Test Account,,08/01/2025,Paycheck,Income: Salary,Income,Salary,,$0.00,$2000.00,Cleared
Test Account,,08/05/2025,Rent,Needs: Housing,Needs,Housing,,$1000.00,$0.00,Cleared
Test Account,,08/10/2025,Groceries,Needs: Food,Needs,Food,,$200.00,$0.00,Cleared
Test Account,,08/15/2025,Concert,Wants: Entertainment,Wants,Entertainment,,$150.00,$0.00,Cleared
Test Account,,08/20/2025,Shopping,Wants: Clothes,Wants,Clothes,,$100.00,$0.00,Cleared
Test Account,,08/25/2025,Misc,Other: Misc,Other,Misc,,$50.00,$0.00,Cleared
";

const TWO_MONTHS: &str = "
Account,Flag,Date,Payee,Category Group/Category,Category Group,Category,Memo,Outflow,Inflow,Cleared
Test Account,,07/01/2025,Paycheck,Income: Salary,Income,Salary,,$0.00,$1500.00,Cleared
Test Account,,07/05/2025,Rent,Needs: Housing,Needs,Housing,,$800.00,$0.00,Cleared
Test Account,,08/01/2025,Paycheck,Income: Salary,Income,Salary,,$0.00,$2000.00,Cleared
Test Account,,08/05/2025,Rent,Needs: Housing,Needs,Housing,,$1000.00,$0.00,Cleared
";

/// Real-world shaped export: parse and summarize one month.
#[test]
fn test_august_export_summary() {
    let rows = read_export(AUGUST.as_bytes()).unwrap();
    assert_eq!(rows.len(), 6);

    let report = generate_report(&rows, 2000.0);
    assert_eq!(report.dropped_rows, 0);
    assert_eq!(report.months.len(), 1);

    let aug = &report.months[0];
    assert_eq!(aug.label, "August 2025");
    assert_eq!(aug.totals.total_net, -500.0);
    assert_eq!(aug.totals.needs_spent, 1200.0);
    assert_eq!(aug.totals.wants_spent, 250.0);
    assert_eq!(aug.totals.other_spent, 50.0);

    assert!(report.recommendations.contains(
        &"Warning: In August 2025, your Needs spending was 60.00% of your inflow, exceeding the 50% guideline.".to_string()
    ));
}

/// Two months in one file produce two blocks, July first.
#[test]
fn test_two_month_export() {
    let rows = read_export(TWO_MONTHS.as_bytes()).unwrap();
    let lines = evaluate_report(&rows, 1500.0);

    assert_eq!(lines[0], "--- July 2025 ---");
    assert_eq!(lines[1], "Total Net Spent: $-700.00");
    assert_eq!(lines[2], "Needs Spent: $800.00");
    assert_eq!(lines[5], "Info: In July 2025, your net spending ($-700.00) was within your monthly inflow ($1500.00).");
    assert_eq!(lines[6], "Warning: In July 2025, your Needs spending was 53.33% of your inflow, exceeding the 50% guideline.");
    assert_eq!(lines[7], "--- August 2025 ---");
}

/// Bad cells never make it into the totals.
#[test]
fn test_dirty_cells_are_dropped() {
    let csv = "Date,Category Group,Outflow,Inflow
08/05/2025,Needs,$1000.00,$0.00
08/06/2025,Needs,pending,$0.00
8-7-2025,Wants,$40.00,$0.00
08/08/2025,Wants,\"$1,040.00\",$0.00
";
    let rows = read_export(csv.as_bytes()).unwrap();
    let report = generate_report(&rows, 5000.0);
    assert_eq!(report.dropped_rows, 2);
    assert_eq!(report.overall.needs_spent, 1000.0);
    assert_eq!(report.overall.wants_spent, 1040.0);
}
