use crate::cli::{Cli, OutputFormat};
use crate::commands::search::loading_spinner;
use crate::commands::{create_orchestrator, print_error, Result};
use crate::output::{format_output, format_ranked_section, terminal_width, OutputData};
use scout_core::{Key, OrchestrationState, QueryInput, SearchOutcome};
use std::io::{IsTerminal, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const EXIT_COMMANDS: &[&str] = &[":q", "quit", "exit"];

/// Interactive loop: one query per line.
///
/// Each line is typed into a [`QueryInput`] and submitted with Enter. The
/// primary stage is awaited in place; ranked results are printed whenever
/// they arrive afterwards, even while the prompt is waiting for input.
pub async fn run(cli: &Cli) -> Result<()> {
    let orchestrator = create_orchestrator(cli)?;
    let theme = cli.theme();
    let interactive = std::io::stdin().is_terminal() && cli.output == OutputFormat::Pretty;

    if interactive {
        eprintln!(
            "{}  {}",
            theme.heading("Scout"),
            theme.dim("type a query and press Enter (:q to quit)")
        );
    }

    let mut updates = orchestrator.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input = QueryInput::new();
    // Generation whose ranked results have already been printed.
    let mut ranked_shown: Option<u64> = None;

    prompt(interactive);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if EXIT_COMMANDS.contains(&line.trim()) {
                    break;
                }

                input.set_text(line);
                if let Some(trigger) = input.on_key(Key::Enter) {
                    let spinner = loading_spinner(input.text());
                    let outcome = orchestrator.trigger(trigger, input.text()).await;
                    spinner.finish_and_clear();

                    match outcome {
                        SearchOutcome::Skipped => {
                            eprintln!("{}", theme.dim("Enter a search query."));
                        }
                        SearchOutcome::Busy => {
                            eprintln!("{}", theme.dim("A search is already running."));
                        }
                        SearchOutcome::Superseded { .. } => {}
                        SearchOutcome::Completed(_) | SearchOutcome::Failed { .. } => {
                            let state = updates.borrow_and_update().clone();
                            render_state(cli, &state)?;
                            if !state.ranked_results.is_empty() {
                                ranked_shown = Some(state.generation);
                            }
                            if let Some(message) = &state.error {
                                print_error(cli, message);
                            }
                        }
                    }
                    input.clear();
                }
                prompt(interactive);
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if ranked_arrived(&state, ranked_shown) {
                    ranked_shown = Some(state.generation);
                    if interactive {
                        eprintln!();
                    }
                    render_ranked(cli, &state)?;
                    prompt(interactive);
                }
            }
        }
    }

    Ok(())
}

/// Ranked results of the current cycle that have not been printed yet.
fn ranked_arrived(state: &OrchestrationState, shown: Option<u64>) -> bool {
    !state.loading
        && !state.ranked_pending
        && !state.ranked_results.is_empty()
        && shown != Some(state.generation)
}

fn render_state(cli: &Cli, state: &OrchestrationState) -> Result<()> {
    format_output(
        &OutputData::SearchState(state.clone()),
        &cli.output,
        cli.theme(),
    )
}

fn render_ranked(cli: &Cli, state: &OrchestrationState) -> Result<()> {
    match cli.output {
        OutputFormat::Pretty => {
            print!(
                "{}",
                format_ranked_section(&state.ranked_results, terminal_width(), cli.theme())
            );
            Ok(())
        }
        _ => render_state(cli, state),
    }
}

fn prompt(interactive: bool) {
    if interactive {
        eprint!("scout> ");
        let _ = std::io::stderr().flush();
    }
}
