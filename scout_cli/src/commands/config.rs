use crate::cli::{Cli, ConfigAction, OutputFormat};
use crate::commands::{copy_to_clipboard, load_config, Result};
use crate::output::{format_output, OutputData};
use scout_core::config::{ENV_BASE_URL, ENV_TIMEOUT_SECS};
use scout_core::{ClientConfig, ConfigStore};
use serde_json::{json, Value};

pub async fn run(cli: &Cli, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Set { key, value } => set_config(cli, &key, &value),
        ConfigAction::Path => {
            println!("{}", ConfigStore::new_default().path().display());
            Ok(())
        }
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    let store = ConfigStore::new_default();
    let config = load_config(cli)?;
    let info = config_json(&store, &config);

    match cli.output {
        OutputFormat::Pretty => {
            let theme = cli.theme();
            println!();
            println!("{}", theme.heading("Scout Configuration"));
            println!("{}", theme.heading("==================="));
            println!();
            println!("Config file: {}", theme.dim(&store.path().display().to_string()));
            println!();
            println!("  {:<14} {}", "base_url", config.base_url);
            println!(
                "  {:<14} {}",
                "timeout_secs",
                config
                    .timeout_secs
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string())
            );
            println!();
            println!(
                "{}",
                theme.dim(&format!(
                    "Environment overrides: {}, {}",
                    ENV_BASE_URL, ENV_TIMEOUT_SECS
                ))
            );
        }
        _ => format_output(&OutputData::ConfigInfo(info.clone()), &cli.output, cli.theme())?,
    }

    if cli.copy {
        copy_to_clipboard(&serde_json::to_string_pretty(&info)?)?;
    }
    Ok(())
}

fn set_config(cli: &Cli, key: &str, value: &str) -> Result<()> {
    let store = ConfigStore::new_default();
    let config = store.set(key, value)?;
    tracing::info!(key, path = %store.path().display(), "configuration updated");

    match cli.output {
        OutputFormat::Pretty | OutputFormat::Text => {
            let theme = cli.theme();
            let shown = match key {
                "timeout_secs" => config
                    .timeout_secs
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string()),
                _ => config.base_url.clone(),
            };
            println!("{} {} = {}", theme.heading("Set"), key, shown);
        }
        _ => format_output(
            &OutputData::ConfigInfo(config_json(&store, &config)),
            &cli.output,
            cli.theme(),
        )?,
    }
    Ok(())
}

fn config_json(store: &ConfigStore, config: &ClientConfig) -> Value {
    json!({
        "path": store.path().display().to_string(),
        "base_url": config.base_url,
        "timeout_secs": config.timeout_secs,
    })
}
