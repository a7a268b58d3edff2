use crate::state::Permission;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ApiKeyChanged(key) => {
            state.set_api_key(key);
            Vec::new()
        }
        Msg::SentenceCountChanged(text) => {
            state.set_sentence_count_text(text);
            Vec::new()
        }
        Msg::PermissionChecked {
            has_permission,
            reason,
        } => {
            state.set_permission(Permission {
                has_permission,
                reason,
            });
            Vec::new()
        }
        Msg::RunClicked => match state.try_start_run() {
            // At most one run in flight: a click while running starts nothing.
            Some((run_id, api_key, sentence_count)) => vec![Effect::StartRun {
                run_id,
                api_key,
                sentence_count,
            }],
            None => Vec::new(),
        },
        Msg::RunProgress {
            run_id,
            stage,
            done,
            total,
        } => {
            state.apply_progress(run_id, stage, done, total);
            Vec::new()
        }
        Msg::RunFinished { run_id, result } => {
            state.apply_finished(run_id, result);
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
