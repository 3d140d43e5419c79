//! spendwise-core: 50/30 budget feedback over normalized transaction exports

pub mod aggregate;
pub mod finance;
pub mod normalize;
pub mod report;
pub mod rules;

pub use aggregate::{aggregate_by_month, summarize, MonthKey, MonthlyAggregate, SpendingTotals};
pub use finance::{CategoryGroup, RawTransaction, Transaction};
pub use normalize::{normalize, parse_amount, parse_date, DropReason, DroppedRow, Normalized};
pub use report::{assemble, evaluate_report, generate_report, report_from_normalized, Report};
pub use rules::{evaluate, Scope};
