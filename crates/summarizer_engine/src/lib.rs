//! Summarizer engine: summary fetching, batched writes and run execution.
mod config;
mod engine;
mod fetcher;
mod host;
mod persist;
mod pipeline;
mod progress;
mod service;
mod table;
mod types;
mod writer;

pub use config::{
    check_sentence_count, ConfigError, PipelineConfig, DEFAULT_DESTINATION_FIELD,
    DEFAULT_SENTENCE_COUNT, DEFAULT_SOURCE_FIELD, MAX_RECORDS_PER_UPDATE, MAX_SENTENCE_COUNT,
    MIN_SENTENCE_COUNT,
};
pub use engine::EngineHandle;
pub use fetcher::{fetch_summaries, FetchOutcome, FetchPlan};
pub use host::{
    render_value, FieldAccessor, NamedField, PermissionCheck, PermissionResult, RecordWriter,
    RowSource, SourceError, WriteError,
};
pub use persist::{write_atomically, PersistError};
pub use pipeline::{run_pipeline, PipelineError, PipelineServices};
pub use progress::{ChannelProgressSink, NullProgressSink, ProgressSink};
pub use service::{
    build_request_url, ServiceSettings, SmmryClient, SummaryClient, SummaryRequest,
    SummaryResponse, DEFAULT_ENDPOINT, INVALID_API_KEY_MESSAGE,
};
pub use table::{JsonTable, TableDocument};
pub use types::{
    FieldUpdate, Progress, RecordId, Row, RunEvent, RunId, RunOutcome, RunSettings, ServiceError,
    ServiceFailureKind, Stage,
};
pub use writer::{write_in_batches, BatchWriteError};
