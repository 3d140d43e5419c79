//! spendwise-ingest: budgeting-app CSV exports into raw transaction rows.

pub mod error;
pub mod export;

pub use error::IngestError;
pub use export::{read_export, read_export_path, OPTIONAL_COLUMNS, REQUIRED_COLUMNS};
