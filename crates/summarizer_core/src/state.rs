use std::fmt;

use crate::view_model::{AppViewModel, ProgressView};

pub type RunId = u64;

pub const MIN_SENTENCES: u8 = 1;
pub const MAX_SENTENCES: u8 = 7;

/// The user's API key. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running {
        run_id: RunId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Listing,
    Summarizing,
    Writing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResultKind {
    Completed { summarized: usize, batches: usize },
    InvalidApiKey,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub has_permission: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    api_key: ApiKey,
    sentence_count_text: String,
    permission: Option<Permission>,
    run: RunState,
    next_run_id: RunId,
    invalid_api_key: bool,
    progress: Option<ProgressView>,
    last_result: Option<RunResultKind>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let sentence_count = parse_sentence_count(&self.sentence_count_text);
        let blocked_reason = self.blocked_reason(&sentence_count);
        AppViewModel {
            api_key_entered: !self.api_key.is_empty(),
            sentence_count_text: self.sentence_count_text.clone(),
            sentence_count_error: sentence_count.err(),
            permission_reason: self
                .permission
                .as_ref()
                .filter(|permission| !permission.has_permission)
                .and_then(|permission| permission.reason.clone()),
            run_enabled: blocked_reason.is_none(),
            blocked_reason,
            running: self.is_running(),
            invalid_api_key: self.invalid_api_key,
            progress: self.progress,
            last_result: self.last_result.clone(),
            dirty: self.dirty,
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_running(&self) -> bool {
        matches!(self.run, RunState::Running { .. })
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_api_key(&mut self, key: String) {
        self.api_key = ApiKey::new(key);
        self.mark_dirty();
    }

    pub(crate) fn set_sentence_count_text(&mut self, text: String) {
        self.sentence_count_text = text;
        self.mark_dirty();
    }

    pub(crate) fn set_permission(&mut self, permission: Permission) {
        self.permission = Some(permission);
        self.mark_dirty();
    }

    /// Starts a run if the form allows it, returning what the run needs.
    pub(crate) fn try_start_run(&mut self) -> Option<(RunId, ApiKey, Option<u8>)> {
        let sentence_count = parse_sentence_count(&self.sentence_count_text);
        if self.blocked_reason(&sentence_count).is_some() {
            return None;
        }
        let sentence_count = sentence_count.ok()?;
        self.next_run_id += 1;
        let run_id = self.next_run_id;
        self.run = RunState::Running { run_id };
        self.progress = None;
        self.mark_dirty();
        Some((run_id, self.api_key.clone(), sentence_count))
    }

    pub(crate) fn apply_progress(&mut self, run_id: RunId, stage: Stage, done: usize, total: usize) {
        if self.run != (RunState::Running { run_id }) {
            return;
        }
        // Summarizing progress is reported once per summarized row.
        if stage == Stage::Summarizing && done > 0 {
            self.invalid_api_key = false;
        }
        self.progress = Some(ProgressView { stage, done, total });
        self.mark_dirty();
    }

    pub(crate) fn apply_finished(&mut self, run_id: RunId, result: RunResultKind) {
        if self.run != (RunState::Running { run_id }) {
            return;
        }
        match &result {
            RunResultKind::InvalidApiKey => self.invalid_api_key = true,
            // Cleared per summarized row, so an empty table leaves it alone.
            RunResultKind::Completed { summarized, .. } if *summarized > 0 => {
                self.invalid_api_key = false;
            }
            RunResultKind::Completed { .. } | RunResultKind::Failed(_) => {}
        }
        self.run = RunState::Idle;
        self.progress = None;
        self.last_result = Some(result);
        self.mark_dirty();
    }

    fn blocked_reason(&self, sentence_count: &Result<Option<u8>, String>) -> Option<String> {
        if self.is_running() {
            return Some("A run is already in progress".to_string());
        }
        match &self.permission {
            None => return Some("Checking permissions".to_string()),
            Some(permission) if !permission.has_permission => {
                return Some(
                    permission
                        .reason
                        .clone()
                        .unwrap_or_else(|| "No permission to update records".to_string()),
                );
            }
            Some(_) => {}
        }
        if self.api_key.is_empty() {
            return Some("Enter an API key".to_string());
        }
        sentence_count.as_ref().err().cloned()
    }
}

/// Empty text means "use the default". Otherwise a whole number of sentences.
pub fn parse_sentence_count(text: &str) -> Result<Option<u8>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.parse::<u8>() {
        Ok(count) if (MIN_SENTENCES..=MAX_SENTENCES).contains(&count) => Ok(Some(count)),
        _ => Err(format!(
            "Sentence count must be a whole number from {MIN_SENTENCES} to {MAX_SENTENCES}"
        )),
    }
}
