use clap::Parser;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};
use commands::*;

const DEFAULT_LOG_FILTER: &str = "scout_cli=info,scout_core=warn";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&cli);

    let result = match &cli.command {
        None => {
            show_overview(&cli);
            Ok(())
        }
        Some(Commands::Search { query }) => search::run(&cli, query).await,
        Some(Commands::Repl) => repl::run(&cli).await,
        Some(Commands::Config { action }) => config::run(&cli, action.clone()).await,
    };

    if let Err(e) = result {
        print_error(&cli, &e.to_string());
        process::exit(1);
    }
}

/// Logs go to stderr so rendered results on stdout stay clean.
fn init_logging(cli: &Cli) {
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        1 => "scout_cli=debug,scout_core=debug".into(),
        _ => "scout_cli=trace,scout_core=trace".into(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(cli.color_enabled()),
        )
        .init();
}

fn show_overview(cli: &Cli) {
    let theme = cli.theme();
    println!();
    println!(
        "{}  {}",
        theme.heading("Scout"),
        theme.dim("- AI-assisted web and video search")
    );
    println!();
    println!("{}", theme.heading("Quick Start:"));
    println!(
        "  {}{}",
        theme.query("scout search \"query\""),
        theme.dim("   Search once and show all results")
    );
    println!(
        "  {}{}",
        theme.query("scout repl"),
        theme.dim("               Interactive search")
    );
    println!(
        "  {}{}",
        theme.query("scout config show"),
        theme.dim("        Show backend configuration")
    );
    println!();
    println!("Run {} for all options.", theme.query("scout --help"));
}
