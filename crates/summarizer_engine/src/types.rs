use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type RunId = u64;

/// Stable identifier of a row in the host table.
pub type RecordId = String;

/// One record of the host table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RecordId,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// New values for some fields of one row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldUpdate {
    pub id: RecordId,
    pub fields: BTreeMap<String, Value>,
}

impl FieldUpdate {
    pub fn single(id: impl Into<RecordId>, field: impl Into<String>, value: Value) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), value);
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// User-entered settings for one run.
#[derive(Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub api_key: String,
    /// `None` means the configured default applies.
    pub sentence_count: Option<u8>,
}

impl fmt::Debug for RunSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunSettings")
            .field("api_key", &"<redacted>")
            .field("sentence_count", &self.sentence_count)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Listing,
    Summarizing,
    Writing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub stage: Stage,
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every row was summarized and all batches were written.
    Completed { summarized: usize, batches: usize },
    /// The summarization service rejected the API key. Nothing was written.
    InvalidApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Progress { run_id: RunId, progress: Progress },
    RunCompleted {
        run_id: RunId,
        result: Result<RunOutcome, crate::PipelineError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ServiceError {
    pub kind: ServiceFailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: ServiceFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceFailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedResponse,
    Network,
}

impl fmt::Display for ServiceFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            ServiceFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            ServiceFailureKind::Timeout => write!(f, "timeout"),
            ServiceFailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            ServiceFailureKind::MalformedResponse => write!(f, "malformed response"),
            ServiceFailureKind::Network => write!(f, "network error"),
        }
    }
}
