use crate::{RunResultKind, Stage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressView {
    pub stage: Stage,
    pub done: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub api_key_entered: bool,
    pub sentence_count_text: String,
    pub sentence_count_error: Option<String>,
    /// Why the host refuses updates to the destination field, if it does.
    pub permission_reason: Option<String>,
    pub run_enabled: bool,
    /// Why the run button is disabled.
    pub blocked_reason: Option<String>,
    pub running: bool,
    pub invalid_api_key: bool,
    pub progress: Option<ProgressView>,
    pub last_result: Option<RunResultKind>,
    pub dirty: bool,
}
