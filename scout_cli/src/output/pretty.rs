//! Pretty formatter for terminal output.
//!
//! Results are grouped into sections with a coloured header line. Web and
//! video results are rendered as numbered cards, ranked results as a table.

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;
use scout_core::{OrchestrationState, RankedResultItem, SearchResultItem, VideoResultItem};
use std::fmt::Write as _;

/// Terminal width for formatting (default fallback)
const DEFAULT_WIDTH: usize = 80;

/// Indent for card content (after number)
const CARD_INDENT: usize = 5;

/// Colour switch for everything rendered here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, text: &str, style: impl FnOnce(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().cyan().to_string())
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, |t| t.red().bold().to_string())
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(text, |t| t.dimmed().to_string())
    }

    pub fn query(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().bold().to_string())
    }

    fn title(&self, text: &str) -> String {
        self.paint(text, |t| t.bold().to_string())
    }

    fn link(&self, url: &str) -> String {
        if self.color {
            format_hyperlink(url, &url.blue().to_string())
        } else {
            url.to_string()
        }
    }
}

/// Render the whole orchestration state.
///
/// The primary error, if any, is not included: callers report it on stderr.
pub fn format_search_state(state: &OrchestrationState, width: usize, theme: Theme) -> String {
    let mut out = String::new();

    if let Some(query) = &state.query {
        let _ = writeln!(out, "{} {}", theme.dim("Search:"), theme.query(query));
        out.push('\n');
    }

    if state.error.is_some() {
        return out;
    }

    if !state.alternative_queries.is_empty() {
        out.push_str(&format_alternatives(&state.alternative_queries, width, theme));
        out.push('\n');
    }

    if !state.search_results.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            format_section_header("Web Results", Some(state.search_results.len()), width, theme)
        );
        for (i, item) in state.search_results.iter().enumerate() {
            out.push_str(&format_web_card(item, i + 1, width, theme));
        }
        out.push('\n');
    }

    if !state.video_results.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            format_section_header("Video Results", Some(state.video_results.len()), width, theme)
        );
        for (i, item) in state.video_results.iter().enumerate() {
            out.push_str(&format_video_card(item, i + 1, theme));
        }
        out.push('\n');
    }

    if !state.ranked_results.is_empty() {
        out.push_str(&format_ranked_section(&state.ranked_results, width, theme));
    } else if state.ranked_pending {
        let _ = writeln!(out, "{}", theme.dim("Ranked results pending..."));
    }

    if !state.loading && !state.ranked_pending && !state.has_results() {
        let _ = writeln!(out, "{}", theme.dim("No results found."));
    }

    out
}

fn format_alternatives(queries: &[String], width: usize, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format_section_header("Alternative Queries", None, width, theme)
    );
    for q in queries {
        let _ = writeln!(out, "  • {}", q);
    }
    out
}

fn format_web_card(item: &SearchResultItem, index: usize, width: usize, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>3}. {}", index, theme.title(&item.title));
    let _ = writeln!(out, "{}{}", " ".repeat(CARD_INDENT), theme.link(&item.link));
    let snippet = clean_snippet(&item.snippet);
    if !snippet.is_empty() {
        let _ = writeln!(out, "{}", wrap_indented(&snippet, width));
    }
    out
}

fn format_video_card(item: &VideoResultItem, index: usize, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>3}. {}", index, theme.title(&item.title));
    let indent = " ".repeat(CARD_INDENT);
    if item.channel.is_empty() {
        let _ = writeln!(out, "{}{}", indent, theme.link(&item.link));
    } else {
        let _ = writeln!(
            out,
            "{}{} {} {}",
            indent,
            theme.dim(&item.channel),
            theme.dim("·"),
            theme.link(&item.link)
        );
    }
    out
}

/// Ranked results as a table, scores with two decimals.
pub fn format_ranked_section(items: &[RankedResultItem], width: usize, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format_section_header("Ranked Results", Some(items.len()), width, theme)
    );

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(u16::try_from(width).unwrap_or(u16::MAX));

    table.set_header(
        ["#", "Score", "Source", "Title", "Link"]
            .iter()
            .map(|h| Cell::new(theme.heading(h)))
            .collect::<Vec<_>>(),
    );

    for (i, item) in items.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format_score(item.rank_score)),
            Cell::new(&item.source),
            Cell::new(&item.title),
            Cell::new(&item.link),
        ]);
    }

    let _ = writeln!(out, "{}", table);
    out
}

fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

fn format_section_header(label: &str, count: Option<usize>, width: usize, theme: Theme) -> String {
    let count_str = match count {
        Some(n) => format!(" ({})", n),
        None => String::new(),
    };

    let header_text = format!("{}{}", label, count_str);
    let line_len = (width.saturating_sub(header_text.len() + 4)).min(60);
    let line = "─".repeat(line_len);

    if theme.color {
        format!(
            "{} {} {}",
            "──".cyan(),
            header_text.green().bold(),
            line.cyan()
        )
    } else {
        format!("── {} {}", header_text, line)
    }
}

fn wrap_indented(text: &str, width: usize) -> String {
    let indent = " ".repeat(CARD_INDENT);
    let options = textwrap::Options::new(width.max(CARD_INDENT + 20))
        .initial_indent(&indent)
        .subsequent_indent(&indent);
    textwrap::fill(text, options)
}

fn clean_snippet(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

/// Format a URL as a clickable hyperlink using OSC 8 escape sequences.
fn format_hyperlink(url: &str, display_text: &str) -> String {
    format!("\x1b]8;;{}\x07{}\x1b]8;;\x07", url, display_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::Query;

    fn ranked(source: &str, title: &str, score: f64) -> RankedResultItem {
        RankedResultItem {
            source: source.into(),
            title: title.into(),
            link: format!("https://example.com/{}", title.to_lowercase()),
            rank_score: score,
            snippet: None,
        }
    }

    #[test]
    fn test_format_section_header() {
        let header = format_section_header("Web Results", Some(3), 80, Theme::plain());
        assert!(header.starts_with("── Web Results (3) "));
    }

    #[test]
    fn test_ranked_scores_two_decimals() {
        let out = format_ranked_section(
            &[ranked("Google", "Alpha", 2.0), ranked("YouTube", "Beta", 0.333)],
            100,
            Theme::plain(),
        );
        assert!(out.contains("Ranked Results (2)"));
        assert!(out.contains("2.00"));
        assert!(out.contains("0.33"));
        assert!(out.contains("YouTube"));
    }

    #[test]
    fn test_snippet_wrapped_to_width() {
        let item = SearchResultItem {
            title: "Long".into(),
            link: "https://example.com".into(),
            snippet: "word ".repeat(40),
        };
        let out = format_web_card(&item, 1, 40, Theme::plain());
        for line in out.lines() {
            assert!(line.chars().count() <= 40, "line too long: {:?}", line);
        }
        assert!(out.lines().count() > 3);
    }

    #[test]
    fn test_empty_sections_hidden() {
        let mut state = OrchestrationState::default();
        state.begin_cycle(1, &Query::parse("rust").unwrap());
        state.apply_primary(
            1,
            scout_core::AskAiResponse {
                alternative_queries: vec!["rust language".into()],
                ..Default::default()
            },
        );
        let out = format_search_state(&state, 80, Theme::plain());
        assert!(out.contains("Search: rust"));
        assert!(out.contains("Alternative Queries"));
        assert!(out.contains("  • rust language"));
        assert!(!out.contains("Web Results"));
        assert!(!out.contains("Video Results"));
        assert!(out.contains("Ranked results pending..."));
    }

    #[test]
    fn test_failed_state_omits_results() {
        let mut state = OrchestrationState::default();
        state.begin_cycle(1, &Query::parse("rust").unwrap());
        state.apply_primary_failure(1, "boom".into());
        let out = format_search_state(&state, 80, Theme::plain());
        assert!(!out.contains("boom"));
        assert!(!out.contains("No results found."));
    }

    #[test]
    fn test_no_results_message() {
        let mut state = OrchestrationState::default();
        state.begin_cycle(1, &Query::parse("rust").unwrap());
        state.apply_primary(1, Default::default());
        state.apply_ranked(1, Vec::new());
        let out = format_search_state(&state, 80, Theme::plain());
        assert!(out.contains("No results found."));
    }

    #[test]
    fn test_plain_theme_has_no_escapes() {
        let theme = Theme::plain();
        assert_eq!(theme.heading("x"), "x");
        assert_eq!(theme.link("https://a"), "https://a");
        assert!(Theme::new(true).heading("x").contains('\x1b'));
    }
}
