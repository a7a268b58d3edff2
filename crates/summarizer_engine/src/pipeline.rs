use std::sync::Arc;

use engine_logging::engine_info;
use thiserror::Error;

use crate::fetcher::{fetch_summaries, FetchOutcome, FetchPlan};
use crate::writer::{write_in_batches, BatchWriteError};
use crate::{
    ConfigError, NamedField, PipelineConfig, Progress, ProgressSink, RecordWriter, RowSource,
    RunOutcome, RunSettings, ServiceError, SourceError, Stage, SummaryClient,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to list rows: {0}")]
    Source(#[from] SourceError),
    #[error("summary request failed: {0}")]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Write(#[from] BatchWriteError),
}

/// Summarizes every row, then writes the summaries back in batches.
///
/// The write stage starts only after every row has been summarized. A
/// rejected key ends the run with [`RunOutcome::InvalidApiKey`] and no writes.
pub async fn run_pipeline(
    source: &dyn RowSource,
    client: &dyn SummaryClient,
    writer: &dyn RecordWriter,
    config: &PipelineConfig,
    settings: &RunSettings,
    sink: &dyn ProgressSink,
) -> Result<RunOutcome, PipelineError> {
    config.validate()?;
    let sentence_count = config.sentence_count(settings.sentence_count);
    crate::config::check_sentence_count(sentence_count)?;

    let rows = source.list_rows().await?;
    sink.emit(Progress {
        stage: Stage::Listing,
        done: rows.len(),
        total: rows.len(),
    });
    engine_info!(
        "Run started: {} rows, {} -> {}, {} sentences",
        rows.len(),
        config.source_field,
        config.destination_field,
        sentence_count
    );

    let accessor = NamedField::new(config.source_field.clone());
    let plan = FetchPlan {
        source: &accessor,
        destination_field: &config.destination_field,
        api_key: &settings.api_key,
        sentence_count,
    };
    let updates = match fetch_summaries(client, &rows, &plan, sink).await? {
        FetchOutcome::Updates(updates) => updates,
        FetchOutcome::InvalidApiKey => return Ok(RunOutcome::InvalidApiKey),
    };

    let batches = write_in_batches(writer, &updates, config.batch_size, sink).await?;
    engine_info!(
        "Run completed: {} rows written in {} batches",
        updates.len(),
        batches
    );
    Ok(RunOutcome::Completed {
        summarized: updates.len(),
        batches,
    })
}

/// Everything a run needs besides the user's settings.
#[derive(Clone)]
pub struct PipelineServices {
    pub source: Arc<dyn RowSource>,
    pub client: Arc<dyn SummaryClient>,
    pub writer: Arc<dyn RecordWriter>,
    pub config: PipelineConfig,
}

impl PipelineServices {
    pub async fn run(
        &self,
        settings: &RunSettings,
        sink: &dyn ProgressSink,
    ) -> Result<RunOutcome, PipelineError> {
        run_pipeline(
            self.source.as_ref(),
            self.client.as_ref(),
            self.writer.as_ref(),
            &self.config,
            settings,
            sink,
        )
        .await
    }
}
