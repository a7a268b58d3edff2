use engine_logging::{engine_info, engine_warn};
use serde_json::Value;

use crate::service::{SummaryClient, SummaryRequest};
use crate::{FieldAccessor, FieldUpdate, Progress, ProgressSink, Row, ServiceError, Stage};

/// What to read, what to write and how to ask for it.
pub struct FetchPlan<'a> {
    pub source: &'a dyn FieldAccessor,
    pub destination_field: &'a str,
    pub api_key: &'a str,
    pub sentence_count: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// One update per row, in row order.
    Updates(Vec<FieldUpdate>),
    /// The key was rejected; no updates survive, including earlier rows.
    InvalidApiKey,
}

/// Summarizes `rows` one at a time, in order.
///
/// Stops at the first rejected key and discards everything gathered so far.
/// Transport and parse failures abort the whole call.
pub async fn fetch_summaries(
    client: &dyn SummaryClient,
    rows: &[Row],
    plan: &FetchPlan<'_>,
    sink: &dyn ProgressSink,
) -> Result<FetchOutcome, ServiceError> {
    let total = rows.len();
    let mut updates = Vec::with_capacity(total);

    for (index, row) in rows.iter().enumerate() {
        let target_url = plan.source.extract(row);
        let response = client
            .summarize(SummaryRequest {
                api_key: plan.api_key,
                sentence_count: plan.sentence_count,
                target_url: &target_url,
            })
            .await?;

        if response.is_invalid_api_key() {
            engine_warn!(
                "Summary service rejected the API key at row {} ({} of {}); discarding {} summaries",
                row.id,
                index + 1,
                total,
                updates.len()
            );
            return Ok(FetchOutcome::InvalidApiKey);
        }

        let summary = response.sm_api_content.map(Value::String).unwrap_or(Value::Null);
        updates.push(FieldUpdate::single(
            row.id.clone(),
            plan.destination_field,
            summary,
        ));
        sink.emit(Progress {
            stage: Stage::Summarizing,
            done: index + 1,
            total,
        });
    }

    engine_info!("Summarized {} rows", updates.len());
    Ok(FetchOutcome::Updates(updates))
}
