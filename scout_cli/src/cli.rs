use crate::output::Theme;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "scout")]
#[command(about = "Scout - AI-assisted web and video search")]
#[command(version)]
#[command(after_help = "\x1b[1;36mQuick Start:\x1b[0m
  scout search \"climate change\"          Run one search and show all results
  scout repl                              Interactive mode, one query per line
  scout config show                       Show backend configuration

\x1b[1;36mConfiguration:\x1b[0m
  scout config set base_url http://10.0.0.5:8000
  SCOUT_BASE_URL=http://localhost:8000 scout search \"rust\"")]
#[command(long_about = "
\x1b[1mScout\x1b[0m - AI-assisted web and video search

Each search asks the backend for:
  • Alternative phrasings of your query
  • Web results and video results
  • A ranked consolidation of stored results (fetched afterwards)
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Copy output to clipboard
    #[arg(short, long, global = true)]
    pub copy: bool,

    /// Backend base URL (overrides config file and SCOUT_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

impl Cli {
    /// Colour is on unless `--no-color` is given or `NO_COLOR` is set.
    pub fn color_enabled(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }

    pub fn theme(&self) -> Theme {
        Theme::new(self.color_enabled())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single search
    ///
    /// Shows alternative queries, web results, video results and, once
    /// available, ranked results.
    #[command(alias = "s")]
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  scout search \"climate change\"
  scout search rust async runtime
  scout search \"climate change\" --output json")]
    Search {
        /// The search query (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Interactive search: type a query and press Enter
    ///
    /// Ranked results are printed as soon as they arrive.
    #[command(alias = "i")]
    Repl,

    /// Manage configuration
    #[command(after_help = "\x1b[1;33mExamples:\x1b[0m
  scout config show
  scout config set base_url http://10.0.0.5:8000
  scout config set timeout_secs 30
  scout config path")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Set a configuration value (base_url, timeout_secs)
    Set {
        /// Key to set
        key: String,
        /// New value (empty to clear timeout_secs)
        value: String,
    },
    /// Print the config file location
    Path,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Pretty,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Plain text output
    Text,
    /// Markdown output
    Markdown,
}
