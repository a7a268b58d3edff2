use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use engine_logging::engine_info;

use crate::pipeline::PipelineServices;
use crate::progress::ChannelProgressSink;
use crate::{RunEvent, RunId, RunSettings};

enum EngineCommand {
    Run { run_id: RunId, settings: RunSettings },
}

/// Runs pipelines on a background thread.
///
/// Runs execute one after another in submission order; a run started while
/// another is in flight waits for it to finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<RunEvent>,
}

impl EngineHandle {
    pub fn new(services: PipelineServices) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("summarizer-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    runtime.block_on(handle_command(&services, command, &event_tx));
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn start_run(&self, run_id: RunId, settings: RunSettings) {
        let _ = self.cmd_tx.send(EngineCommand::Run { run_id, settings });
    }

    /// Blocks until the next event, or `None` once the worker is gone.
    pub fn recv(&self) -> Option<RunEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<RunEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    services: &PipelineServices,
    command: EngineCommand,
    event_tx: &mpsc::Sender<RunEvent>,
) {
    match command {
        EngineCommand::Run { run_id, settings } => {
            engine_info!("Run {} starting", run_id);
            let sink = ChannelProgressSink::new(run_id, event_tx.clone());
            let result = services.run(&settings, &sink).await;
            let _ = event_tx.send(RunEvent::RunCompleted { run_id, result });
        }
    }
}
