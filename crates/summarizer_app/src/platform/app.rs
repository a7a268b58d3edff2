use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use summarizer_core::{update, AppState, Effect, Msg, RunResultKind};
use summarizer_engine::{
    EngineHandle, JsonTable, PermissionCheck, PipelineServices, SmmryClient,
};

use super::cli::Cli;
use super::config::SettingsFile;
use super::effects::EffectRunner;
use super::render::render;

/// Exit code when the summarization service rejects the API key.
const EXIT_INVALID_API_KEY: u8 = 2;

pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    engine_logging::initialize(LogDestination::from(cli.log), level);

    let settings = match &cli.config {
        Some(path) => SettingsFile::load(path)?,
        None => SettingsFile::default(),
    };
    let mut config = settings.into_config();
    if let Some(endpoint) = cli.endpoint.clone() {
        config.service.endpoint = endpoint;
    }
    config.pipeline.validate().context("invalid settings")?;

    let table = Arc::new(
        JsonTable::open(&cli.table)
            .with_context(|| format!("opening table {}", cli.table.display()))?,
    );
    let permission = table.check_update_permission(&[config.pipeline.destination_field.as_str()]);
    let client = SmmryClient::new(config.service.clone()).context("creating summary client")?;

    let services = PipelineServices {
        source: table.clone(),
        client: Arc::new(client),
        writer: table.clone(),
        config: config.pipeline.clone(),
    };
    let runner = EffectRunner::new(EngineHandle::new(services).context("starting engine")?);

    let mut state = AppState::new();
    for msg in [
        Msg::PermissionChecked {
            has_permission: permission.has_permission,
            reason: permission.reason,
        },
        Msg::ApiKeyChanged(cli.api_key),
        Msg::SentenceCountChanged(cli.sentences),
    ] {
        state = update(state, msg).0;
    }

    let (next, effects) = update(state, Msg::RunClicked);
    state = next;
    if effects.is_empty() {
        print_view(&mut state);
        return Ok(ExitCode::FAILURE);
    }
    engine_info!(
        "Summarizing table {:?}: {} -> {}",
        table.name(),
        config.pipeline.source_field,
        config.pipeline.destination_field
    );
    dispatch(&runner, effects);
    print_view(&mut state);

    while state.is_running() {
        let msg = runner
            .next_msg()
            .context("engine stopped before the run finished")?;
        let (next, effects) = update(state, msg);
        state = next;
        dispatch(&runner, effects);
        print_view(&mut state);
    }

    Ok(ExitCode::from(exit_status(state.view().last_result.as_ref())))
}

fn exit_status(result: Option<&RunResultKind>) -> u8 {
    match result {
        Some(RunResultKind::Completed { .. }) => 0,
        Some(RunResultKind::InvalidApiKey) => EXIT_INVALID_API_KEY,
        Some(RunResultKind::Failed(_)) | None => 1,
    }
}

fn dispatch(runner: &EffectRunner, effects: Vec<Effect>) {
    if !effects.is_empty() {
        runner.enqueue(effects);
    }
}

fn print_view(state: &mut AppState) {
    if !state.consume_dirty() {
        return;
    }
    for line in render(&state.view()) {
        println!("{line}");
    }
}
