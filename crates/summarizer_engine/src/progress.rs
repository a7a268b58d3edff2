use std::sync::mpsc;

use crate::{Progress, RunEvent, RunId};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: Progress);
}

/// Discards progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _progress: Progress) {}
}

/// Forwards progress of one run to the engine's event channel.
pub struct ChannelProgressSink {
    run_id: RunId,
    tx: mpsc::Sender<RunEvent>,
}

impl ChannelProgressSink {
    pub fn new(run_id: RunId, tx: mpsc::Sender<RunEvent>) -> Self {
        Self { run_id, tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, progress: Progress) {
        let _ = self.tx.send(RunEvent::Progress {
            run_id: self.run_id,
            progress,
        });
    }
}
