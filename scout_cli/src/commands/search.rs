use crate::cli::Cli;
use crate::commands::{copy_to_clipboard, create_orchestrator, CommandError, Result};
use crate::output::{format_output, OutputData};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use scout_core::{Query, QueryInput, SearchOutcome};
use std::time::Duration;

/// Run a single search cycle and render the final state.
///
/// Waits for the ranked stage before rendering, so the output holds every
/// section the backend produced. Fails when the primary request failed.
pub async fn run(cli: &Cli, words: &[String]) -> Result<()> {
    let mut input = QueryInput::new();
    input.set_text(words.join(" "));

    if Query::parse(input.text()).is_none() {
        let hint = "Nothing to search for. Try: scout search \"climate change\"";
        if cli.color_enabled() {
            eprintln!("{}", hint.yellow());
        } else {
            eprintln!("{}", hint);
        }
        return Ok(());
    }

    let orchestrator = create_orchestrator(cli)?;

    let spinner = loading_spinner(input.text());
    let outcome = orchestrator.trigger(input.click(), input.text()).await;
    spinner.finish_and_clear();

    if let SearchOutcome::Completed(cycle) = outcome {
        let ranked = cycle.ranked_settled().await;
        tracing::debug!(?ranked, "ranked stage finished");
    }

    let state = orchestrator.snapshot();
    let output_data = OutputData::SearchState(state.clone());
    format_output(&output_data, &cli.output, cli.theme())?;

    if cli.copy {
        let text = serde_json::to_string_pretty(&state)?;
        copy_to_clipboard(&text)?;
    }

    match state.error {
        Some(message) => Err(CommandError::SearchFailed(message)),
        None => Ok(()),
    }
}

/// Spinner shown while the primary request is in flight.
pub fn loading_spinner(query: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Searching for '{}'...", query));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
