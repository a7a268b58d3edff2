use engine_logging::{engine_info, engine_warn};
use summarizer_core::{Effect, Msg, RunResultKind, Stage};
use summarizer_engine::{EngineHandle, RunEvent, RunOutcome, RunSettings};

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartRun {
                    run_id,
                    api_key,
                    sentence_count,
                } => {
                    engine_info!("StartRun run_id={} sentence_count={:?}", run_id, sentence_count);
                    self.engine.start_run(
                        run_id,
                        RunSettings {
                            api_key: api_key.expose().to_string(),
                            sentence_count,
                        },
                    );
                }
            }
        }
    }

    /// Blocks for the next engine event, translated into a core message.
    pub fn next_msg(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }
}

fn map_event(event: RunEvent) -> Msg {
    match event {
        RunEvent::Progress { run_id, progress } => Msg::RunProgress {
            run_id,
            stage: map_stage(progress.stage),
            done: progress.done,
            total: progress.total,
        },
        RunEvent::RunCompleted { run_id, result } => Msg::RunFinished {
            run_id,
            result: match result {
                Ok(RunOutcome::Completed {
                    summarized,
                    batches,
                }) => RunResultKind::Completed {
                    summarized,
                    batches,
                },
                Ok(RunOutcome::InvalidApiKey) => RunResultKind::InvalidApiKey,
                Err(err) => {
                    engine_warn!("Run {} failed: {}", run_id, err);
                    RunResultKind::Failed(err.to_string())
                }
            },
        },
    }
}

fn map_stage(stage: summarizer_engine::Stage) -> Stage {
    match stage {
        summarizer_engine::Stage::Listing => Stage::Listing,
        summarizer_engine::Stage::Summarizing => Stage::Summarizing,
        summarizer_engine::Stage::Writing => Stage::Writing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use summarizer_engine::{PipelineError, Progress, SourceError};

    #[test]
    fn engine_events_map_to_core_messages() {
        let progress = map_event(RunEvent::Progress {
            run_id: 3,
            progress: Progress {
                stage: summarizer_engine::Stage::Writing,
                done: 50,
                total: 120,
            },
        });
        assert_eq!(
            progress,
            Msg::RunProgress {
                run_id: 3,
                stage: Stage::Writing,
                done: 50,
                total: 120,
            }
        );

        let rejected = map_event(RunEvent::RunCompleted {
            run_id: 3,
            result: Ok(RunOutcome::InvalidApiKey),
        });
        assert_eq!(
            rejected,
            Msg::RunFinished {
                run_id: 3,
                result: RunResultKind::InvalidApiKey,
            }
        );

        let failed = map_event(RunEvent::RunCompleted {
            run_id: 4,
            result: Err(PipelineError::Source(SourceError::Unavailable(
                "gone".to_string(),
            ))),
        });
        assert_eq!(
            failed,
            Msg::RunFinished {
                run_id: 4,
                result: RunResultKind::Failed("failed to list rows: table unavailable: gone".to_string()),
            }
        );
    }
}
