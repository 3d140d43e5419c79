//! Read budgeting-app CSV exports (YNAB-style) into [`RawTransaction`]s.
//!
//! Expected header, in any column order:
//! Account,Flag,Date,Payee,Category Group/Category,Category Group,Category,Memo,Outflow,Inflow,Cleared
//!
//! Only `Date`, `Category Group`, `Outflow` and `Inflow` are required.

use std::io;
use std::path::Path;

use csv::StringRecord;
use spendwise_core::RawTransaction;

use crate::error::{IngestError, Result};

pub const REQUIRED_COLUMNS: [&str; 4] = ["Date", "Category Group", "Outflow", "Inflow"];
pub const OPTIONAL_COLUMNS: [&str; 2] = ["Category", "Payee"];

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    date: usize,
    category_group: usize,
    outflow: usize,
    inflow: usize,
    category: Option<usize>,
    payee: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h.trim() == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|&&name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(IngestError::MissingColumns(missing));
        }

        // Presence was checked above.
        let [date, category_group, outflow, inflow] = REQUIRED_COLUMNS.map(|name| find(name).unwrap_or_default());
        let [category, payee] = OPTIONAL_COLUMNS.map(find);
        Ok(Self {
            date,
            category_group,
            outflow,
            inflow,
            category,
            payee,
        })
    }

    fn extract(&self, record: &StringRecord) -> RawTransaction {
        let cell = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        let optional = |i: Option<usize>| {
            i.and_then(|i| record.get(i))
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        RawTransaction {
            date: cell(self.date),
            category_group: cell(self.category_group),
            outflow: cell(self.outflow),
            inflow: cell(self.inflow),
            category: optional(self.category),
            payee: optional(self.payee),
        }
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Read every data row. Fails only when the header is missing required
/// columns or the CSV itself is unreadable; bad cell values are left for
/// the normalizer to drop.
pub fn read_export<R: io::Read>(reader: R) -> Result<Vec<RawTransaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(reader);

    let mut columns: Option<Columns> = None;
    let mut rows = Vec::new();

    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }

        match columns {
            None => columns = Some(Columns::from_header(&record)?),
            Some(cols) => rows.push(cols.extract(&record)),
        }
    }

    if columns.is_none() {
        return Err(IngestError::MissingColumns(
            REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        ));
    }

    tracing::debug!(rows = rows.len(), "read export rows");
    Ok(rows)
}

pub fn read_export_path(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_export(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "
Account,Flag,Date,Payee,Category Group/Category,Category Group,Category,Memo,Outflow,Inflow,Cleared
Test Account,,08/01/2025,Paycheck,Income: Salary,Income,Salary,,$0.00,$2000.00,Cleared
Test Account,,08/05/2025,Rent,Needs: Housing,Needs,Housing,,$1000.00,$0.00,Cleared
";

    #[test]
    fn test_reads_rows_by_header_name() {
        let rows = read_export(EXPORT.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "08/01/2025");
        assert_eq!(rows[0].category_group, "Income");
        assert_eq!(rows[0].inflow, "$2000.00");
        assert_eq!(rows[1].outflow, "$1000.00");
        assert_eq!(rows[1].category.as_deref(), Some("Housing"));
        assert_eq!(rows[1].payee.as_deref(), Some("Rent"));
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let csv = "Inflow,Outflow,Category Group,Date\n$0.00,$12.00,Wants,09/01/2025\n";
        let rows = read_export(csv.as_bytes()).unwrap();
        assert_eq!(rows[0], RawTransaction::new("09/01/2025", "Wants", "$12.00", "$0.00"));
    }

    #[test]
    fn test_missing_columns_are_listed() {
        let csv = "Date,Category Group,Outflow\n08/01/2025,Needs,$1.00\n";
        let err = read_export(csv.as_bytes()).unwrap_err();
        match &err {
            IngestError::MissingColumns(cols) => assert_eq!(cols, &vec!["Inflow".to_string()]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("missing: Inflow"));
    }

    #[test]
    fn test_header_names_are_exact() {
        let csv = "date,category group,outflow,inflow\n";
        let err = read_export(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumns(ref c) if c.len() == 4));
    }

    #[test]
    fn test_optional_columns_absent() {
        let csv = "Date,Category Group,Outflow,Inflow,Payee\n08/01/2025,Needs,$1.00,$0.00,Grocer\n";
        let rows = read_export(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].category, None);
        assert_eq!(rows[0].payee.as_deref(), Some("Grocer"));
    }

    #[test]
    fn test_empty_input_is_schema_error() {
        assert!(matches!(read_export("".as_bytes()), Err(IngestError::MissingColumns(_))));
    }

    #[test]
    fn test_short_rows_yield_empty_cells() {
        let csv = "Date,Category Group,Outflow,Inflow\n08/01/2025,Needs\n";
        let rows = read_export(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].outflow, "");
        assert_eq!(rows[0].inflow, "");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_export_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
