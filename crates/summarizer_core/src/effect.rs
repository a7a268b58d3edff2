use crate::{ApiKey, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartRun {
        run_id: RunId,
        api_key: ApiKey,
        /// `None` when the user left the field empty.
        sentence_count: Option<u8>,
    },
}
