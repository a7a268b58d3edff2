use engine_logging::{engine_debug, engine_error};
use thiserror::Error;

use crate::{FieldUpdate, Progress, ProgressSink, RecordWriter, Stage, WriteError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("batch {batch_index} failed after {written} records were written: {source}")]
pub struct BatchWriteError {
    pub batch_index: usize,
    /// Records from earlier batches, which stay written.
    pub written: usize,
    pub source: WriteError,
}

/// Submits `updates` in contiguous chunks of at most `batch_size`, awaiting
/// each chunk before sending the next. Returns the number of calls made.
///
/// An empty slice makes no calls. The first failed call ends the write;
/// later chunks are never attempted.
pub async fn write_in_batches(
    writer: &dyn RecordWriter,
    updates: &[FieldUpdate],
    batch_size: usize,
    sink: &dyn ProgressSink,
) -> Result<usize, BatchWriteError> {
    // PipelineConfig::validate rejects 0; chunks() would panic on it.
    let batch_size = batch_size.max(1);
    let total = updates.len();
    let mut written = 0;
    let mut batches = 0;

    for (batch_index, batch) in updates.chunks(batch_size).enumerate() {
        engine_debug!(
            "Writing batch {} ({} records, {} of {} written)",
            batch_index,
            batch.len(),
            written,
            total
        );
        if let Err(source) = writer.update_records(batch).await {
            engine_error!("Batch {} failed: {}", batch_index, source);
            return Err(BatchWriteError {
                batch_index,
                written,
                source,
            });
        }
        written += batch.len();
        batches += 1;
        sink.emit(Progress {
            stage: Stage::Writing,
            done: written,
            total,
        });
    }

    Ok(batches)
}
