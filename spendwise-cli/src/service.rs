//! Upload and chat operations over a [`SessionStore`].

use std::io;

use anyhow::Result;
use serde::Serialize;
use spendwise_core::{aggregate_by_month, assemble, normalize, report_from_normalized, summarize};
use spendwise_ingest::read_export;

use crate::assistant::{DatasetSnapshot, QuestionAnswerer};
use crate::config::ChatSection;
use crate::session::{Session, SessionStore};

pub const NO_DATASET_MSG: &str = "Please upload a CSV file first.";

/// `{"recommendations": [...]}` or `{"error": "..."}`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum UploadResponse {
    Recommendations(Vec<String>),
    Error(String),
}

/// `{"response": "..."}`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

/// Parse an export, store it under `session_id` and return its report.
/// On a schema or read error the store is left as it was.
pub fn upload<R: io::Read>(
    store: &mut SessionStore,
    session_id: &str,
    reader: R,
    monthly_income: f64,
) -> UploadResponse {
    let rows = match read_export(reader) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(session = session_id, error = %e, "upload rejected");
            return UploadResponse::Error(e.to_string());
        }
    };

    let normalized = normalize(&rows);
    let report = report_from_normalized(&normalized, monthly_income);
    tracing::info!(
        session = session_id,
        rows = rows.len(),
        dropped = report.dropped_rows,
        months = report.months.len(),
        "dataset uploaded"
    );

    store.put(Session::new(session_id, normalized.transactions, monthly_income));
    UploadResponse::Recommendations(report.recommendations)
}

/// Recommendations for the dataset currently held by a session.
pub fn session_report(store: &SessionStore, session_id: &str) -> Option<Vec<String>> {
    let session = store.get(session_id)?;
    let months = aggregate_by_month(&session.transactions);
    let overall = summarize(&session.transactions);
    Some(assemble(&months, &overall, session.monthly_income))
}

/// Answer a question about the session's dataset, recording the exchange.
pub async fn chat<A: QuestionAnswerer>(
    store: &mut SessionStore,
    session_id: &str,
    answerer: &A,
    message: &str,
    settings: &ChatSection,
) -> Result<ChatResponse> {
    let Some(session) = store.get_mut(session_id) else {
        return Ok(ChatResponse {
            response: NO_DATASET_MSG.to_string(),
        });
    };

    let snapshot = DatasetSnapshot::new(
        &session.transactions,
        session.monthly_income,
        settings.max_rows_in_context,
    )?;
    tracing::debug!(
        session = session_id,
        rows = snapshot.row_count,
        truncated = snapshot.truncated,
        "asking question"
    );

    let answer = answerer
        .ask(session.recent_history(settings.max_turns_context), &snapshot, message)
        .await?;
    session.record_exchange(message, &answer);

    Ok(ChatResponse { response: answer })
}
