//! CLI module for the relay
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the webhook relay server
//! - `dashboard` - Fetch KPIs and top influencers once and print them
//! - `insights` - Fetch daily revenue vs. ad spend and print it
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! relay serve
//!
//! # Dashboard for January, straight against the webhook host
//! relay dashboard --base-url https://n8n.example.com/webhook --from 2024-01-01 --to 2024-01-31
//!
//! # Generate shell completions
//! relay completions bash > ~/.bash_completion.d/relay
//! ```

pub mod completions;
pub mod config;
pub mod dashboard;
pub mod insights;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Dashboard Relay - n8n webhook proxy and analytics client
#[derive(Parser, Debug)]
#[command(
    name = "relay",
    version,
    about = "Webhook forwarding proxy and client for the analytics dashboard"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the relay server
    Serve(ServeArgs),
    /// Show KPIs and best performers
    Dashboard(DashboardArgs),
    /// Show daily revenue vs. ad spend
    Insights(InsightsArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "RELAY_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "RELAY_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RELAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Override the webhook base URL
    #[arg(long)]
    pub upstream: Option<String>,
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml")]
    pub config: PathBuf,

    /// Base URL of the relay proxy mount or the webhook host
    #[arg(long)]
    pub base_url: Option<String>,

    /// Start of the date range (YYYY-MM-DD or RFC 3339); omit for all time
    #[arg(long, value_parser = parse_date_arg)]
    pub from: Option<DateTime<Utc>>,

    /// End of the date range (defaults to --from)
    #[arg(long, value_parser = parse_date_arg, requires = "from")]
    pub to: Option<DateTime<Utc>>,

    /// Number of influencers to fetch
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InsightsArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml")]
    pub config: PathBuf,

    /// Base URL of the relay proxy mount or the webhook host
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "relay.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Parse a `--from`/`--to` value. Bare dates are taken as midnight UTC.
pub fn parse_date_arg(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| format!("invalid date: {}", s));
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| format!("expected YYYY-MM-DD or RFC 3339 timestamp, got '{}'", s))
}

/// Load the config file for a client command, falling back to defaults.
pub(crate) fn load_client_config(
    path: &std::path::Path,
) -> Result<crate::config::RelayConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        crate::config::RelayConfig::load(Some(path))?
    } else {
        crate::config::RelayConfig::default()
    };
    Ok(config.with_env_overrides())
}
