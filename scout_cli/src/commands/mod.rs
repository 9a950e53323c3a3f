pub mod config;
pub mod repl;
pub mod search;

use crate::cli::Cli;
use scout_core::{ClientConfig, ConfigStore, HttpBackend, SearchOrchestrator};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{0}")]
    SearchFailed(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] scout_core::ConfigError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CommandError>;

/// Effective client config: file, then environment, then `--base-url`.
pub fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ConfigStore::new_default().load()?.apply_env()?;
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    config.validate()?;
    Ok(config)
}

pub fn create_orchestrator(cli: &Cli) -> Result<SearchOrchestrator<HttpBackend>> {
    let config = load_config(cli)?;
    tracing::debug!(base_url = %config.base_url, "using backend");
    Ok(SearchOrchestrator::new(HttpBackend::new(&config)?))
}

/// Report a user-visible error on stderr.
pub fn print_error(cli: &Cli, message: &str) {
    eprintln!("{}: {}", cli.theme().error("Error"), message);
}

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| CommandError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|e| CommandError::Clipboard(e.to_string()))?;
    eprintln!("Copied to clipboard");
    Ok(())
}
