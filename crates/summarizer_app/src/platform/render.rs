use summarizer_core::{AppViewModel, RunResultKind, Stage};

/// Status lines for the current view, one per concern.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(reason) = &view.permission_reason {
        lines.push(format!("Cannot update records: {reason}"));
    }
    if let Some(error) = &view.sentence_count_error {
        lines.push(error.clone());
    }
    if view.invalid_api_key {
        lines.push("Invalid API key".to_string());
    }

    if view.running {
        let progress = match view.progress {
            Some(progress) => format!(
                "{}: {} / {}",
                stage_label(progress.stage),
                progress.done,
                progress.total
            ),
            None => "Starting".to_string(),
        };
        lines.push(progress);
    } else if let Some(result) = &view.last_result {
        lines.push(result_label(result));
    } else if let Some(reason) = &view.blocked_reason {
        lines.push(format!("Not ready: {reason}"));
    }

    lines
}

fn stage_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Listing => "Reading rows",
        Stage::Summarizing => "Summarizing",
        Stage::Writing => "Writing",
    }
}

fn result_label(result: &RunResultKind) -> String {
    match result {
        RunResultKind::Completed {
            summarized,
            batches,
        } => format!("Done: {summarized} rows summarized, {batches} updates"),
        RunResultKind::InvalidApiKey => "Stopped: the API key was rejected".to_string(),
        RunResultKind::Failed(message) => format!("Failed: {message}"),
    }
}
