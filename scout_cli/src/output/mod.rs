use crate::cli::OutputFormat;
use crate::commands::Result;
use scout_core::OrchestrationState;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write as _;

mod pretty;
pub use pretty::{format_ranked_section, format_search_state, terminal_width, Theme};

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OutputData {
    SearchState(OrchestrationState),
    ConfigInfo(Value),
}

pub fn format_output(data: &OutputData, format: &OutputFormat, theme: Theme) -> Result<()> {
    let rendered = render_output(data, format, theme)?;
    print!("{}", rendered);
    Ok(())
}

/// Render `data` in `format` without printing it.
pub fn render_output(data: &OutputData, format: &OutputFormat, theme: Theme) -> Result<String> {
    let out = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Text => format_text_output(data)?,
        OutputFormat::Markdown => format_markdown_output(data)?,
        OutputFormat::Pretty => format_pretty_output(data, theme)?,
    };
    Ok(out)
}

fn format_text_output(data: &OutputData) -> Result<String> {
    let mut out = String::new();
    match data {
        OutputData::SearchState(state) => {
            if let Some(query) = &state.query {
                let _ = writeln!(out, "Query: {}", query);
            }
            if !state.alternative_queries.is_empty() {
                let _ = writeln!(out, "Alternative queries:");
                for q in &state.alternative_queries {
                    let _ = writeln!(out, "  - {}", q);
                }
            }
            if !state.search_results.is_empty() {
                let _ = writeln!(out, "Web results:");
                for (i, item) in state.search_results.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}\t{}", i + 1, item.title, item.link);
                }
            }
            if !state.video_results.is_empty() {
                let _ = writeln!(out, "Video results:");
                for (i, item) in state.video_results.iter().enumerate() {
                    let _ = writeln!(out, "  {}. {}\t{}", i + 1, item.title, item.link);
                }
            }
            if !state.ranked_results.is_empty() {
                let _ = writeln!(out, "Ranked results:");
                for (i, item) in state.ranked_results.iter().enumerate() {
                    let _ = writeln!(
                        out,
                        "  {}. {:.2}\t{}\t{}\t{}",
                        i + 1,
                        item.rank_score,
                        item.source,
                        item.title,
                        item.link
                    );
                }
            }
        }
        OutputData::ConfigInfo(config) => {
            let _ = writeln!(out, "Configuration:");
            let _ = writeln!(out, "{}", serde_json::to_string_pretty(config)?);
        }
    }
    Ok(out)
}

fn format_markdown_output(data: &OutputData) -> Result<String> {
    let mut out = String::new();
    match data {
        OutputData::SearchState(state) => {
            let _ = writeln!(
                out,
                "# Search: {}\n",
                state.query.as_deref().unwrap_or_default()
            );
            if let Some(err) = &state.error {
                let _ = writeln!(out, "> **Error:** {}\n", err);
            }
            if !state.alternative_queries.is_empty() {
                let _ = writeln!(out, "## Alternative Queries\n");
                for q in &state.alternative_queries {
                    let _ = writeln!(out, "- {}", q);
                }
                out.push('\n');
            }
            if !state.search_results.is_empty() {
                let _ = writeln!(out, "## Web Results\n");
                for (i, item) in state.search_results.iter().enumerate() {
                    let _ = writeln!(out, "{}. [{}]({})", i + 1, item.title, item.link);
                    if !item.snippet.is_empty() {
                        let _ = writeln!(out, "   {}", item.snippet.trim());
                    }
                }
                out.push('\n');
            }
            if !state.video_results.is_empty() {
                let _ = writeln!(out, "## Video Results\n");
                for (i, item) in state.video_results.iter().enumerate() {
                    if item.channel.is_empty() {
                        let _ = writeln!(out, "{}. [{}]({})", i + 1, item.title, item.link);
                    } else {
                        let _ = writeln!(
                            out,
                            "{}. [{}]({}) - {}",
                            i + 1,
                            item.title,
                            item.link,
                            item.channel
                        );
                    }
                }
                out.push('\n');
            }
            if !state.ranked_results.is_empty() {
                let _ = writeln!(out, "## Ranked Results\n");
                let _ = writeln!(out, "| Score | Source | Title |");
                let _ = writeln!(out, "|------:|--------|-------|");
                for item in &state.ranked_results {
                    let _ = writeln!(
                        out,
                        "| {:.2} | {} | [{}]({}) |",
                        item.rank_score,
                        item.source,
                        item.title.replace('|', "\\|"),
                        item.link
                    );
                }
                out.push('\n');
            }
        }
        OutputData::ConfigInfo(config) => {
            let _ = writeln!(out, "# Configuration\n");
            let _ = writeln!(out, "```json");
            let _ = writeln!(out, "{}", serde_json::to_string_pretty(config)?);
            let _ = writeln!(out, "```");
        }
    }
    Ok(out)
}

fn format_pretty_output(data: &OutputData, theme: Theme) -> Result<String> {
    let out = match data {
        OutputData::SearchState(state) => format_search_state(state, terminal_width(), theme),
        OutputData::ConfigInfo(config) => {
            let mut out = String::new();
            let _ = writeln!(out, "{}", theme.heading("Configuration"));
            if let Value::Object(map) = config {
                for (key, value) in map {
                    let shown = match value {
                        Value::String(s) => s.clone(),
                        Value::Null => "-".to_string(),
                        other => other.to_string(),
                    };
                    let _ = writeln!(out, "  {:<14} {}", key, shown);
                }
            }
            out
        }
    };
    Ok(out)
}
