#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the API key input.
    ApiKeyChanged(String),
    /// User edited the sentence count input.
    SentenceCountChanged(String),
    /// Host answered the permission check for the destination field.
    PermissionChecked {
        has_permission: bool,
        reason: Option<String>,
    },
    /// User clicked the run button.
    RunClicked,
    /// Engine progress for a run.
    RunProgress {
        run_id: crate::RunId,
        stage: crate::Stage,
        done: usize,
        total: usize,
    },
    /// Engine completion for a run.
    RunFinished {
        run_id: crate::RunId,
        result: crate::RunResultKind,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
