#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use summarizer_engine::{
    FieldUpdate, Progress, ProgressSink, RecordWriter, Row, RowSource, ServiceError,
    ServiceFailureKind, SourceError, SummaryClient, SummaryRequest, SummaryResponse, WriteError,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn url_rows(count: usize) -> Vec<Row> {
    (1..=count)
        .map(|n| Row::new(format!("r{n}")).with_field("URL", format!("https://site{n}.example")))
        .collect()
}

pub fn summary(text: &str) -> SummaryResponse {
    SummaryResponse {
        sm_api_content: Some(text.to_string()),
        ..SummaryResponse::default()
    }
}

pub fn invalid_key() -> SummaryResponse {
    SummaryResponse {
        sm_api_message: Some("INVALID API KEY".to_string()),
        ..SummaryResponse::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub api_key: String,
    pub sentence_count: u8,
    pub target_url: String,
}

/// Replies with queued responses; once the queue is empty, echoes the target.
#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<SummaryResponse, ServiceError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<SummaryResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn echo() -> Self {
        Self::default()
    }

    pub fn push_error(&self, kind: ServiceFailureKind) {
        self.responses.lock().unwrap().push_back(Err(ServiceError {
            kind,
            message: "scripted failure".to_string(),
        }));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SummaryClient for ScriptedClient {
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<SummaryResponse, ServiceError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            api_key: request.api_key.to_string(),
            sentence_count: request.sentence_count,
            target_url: request.target_url.to_string(),
        });
        tokio::task::yield_now().await;
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(summary(&format!("summary of {}", request.target_url))))
    }
}

pub struct VecSource {
    rows: Vec<Row>,
}

impl VecSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

#[async_trait::async_trait]
impl RowSource for VecSource {
    async fn list_rows(&self) -> Result<Vec<Row>, SourceError> {
        Ok(self.rows.clone())
    }
}

/// Records every batch and how many calls overlapped.
#[derive(Default)]
pub struct RecordingWriter {
    batches: Mutex<Vec<Vec<FieldUpdate>>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    fail_on_call: Option<usize>,
    calls: AtomicUsize,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on_call(call_index: usize) -> Self {
        Self {
            fail_on_call: Some(call_index),
            ..Self::default()
        }
    }

    pub fn batches(&self) -> Vec<Vec<FieldUpdate>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches().iter().map(Vec::len).collect()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RecordWriter for RecordingWriter {
    async fn update_records(&self, batch: &[FieldUpdate]) -> Result<(), WriteError> {
        let call_index = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(2)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.fail_on_call == Some(call_index) {
            return Err(WriteError::Rejected("scripted rejection".to_string()));
        }
        self.batches.lock().unwrap().push(batch.to_vec());
        Ok(())
    }
}

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<Progress>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Progress> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, progress: Progress) {
        self.events.lock().unwrap().push(progress);
    }
}
