//! Summarizer core: pure state machine for the settings form and run control.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    parse_sentence_count, ApiKey, AppState, Permission, RunId, RunResultKind, RunState, Stage,
    MAX_SENTENCES, MIN_SENTENCES,
};
pub use update::update;
pub use view_model::{AppViewModel, ProgressView};
