//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// streamcast - resilient multi-platform stream dispatch
#[derive(Parser, Debug)]
#[command(
    name = "streamcast",
    author,
    version,
    about = "Multi-platform streaming studio dispatch layer",
    long_about = "A resilient dispatch layer for multi-platform streaming studios.\n\n\
                  Replicates authenticated API requests across independently-configured \n\
                  streaming platforms, aggregates their results, and keeps one platform's \n\
                  outage from ever blocking the others."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "STREAMCAST_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "STREAMCAST_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an interactive streaming session
    Run(RunArgs),

    /// Dispatch a single operation to the configured platforms
    Dispatch(DispatchArgs),

    /// Validate configuration file without running
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "streamcast.toml",
        env = "STREAMCAST_CONFIG"
    )]
    pub config: PathBuf,

    /// Session duration in seconds (0 = run until ctrl-c)
    #[arg(long, default_value = "0", env = "STREAMCAST_DURATION")]
    pub duration: u64,

    /// Validate configuration and exit without running the session
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the moderation round at session start
    #[arg(long)]
    pub no_moderation: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "STREAMCAST_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `dispatch` command
#[derive(Parser, Debug, Clone)]
pub struct DispatchArgs {
    /// Path to configuration file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "streamcast.toml",
        env = "STREAMCAST_CONFIG"
    )]
    pub config: PathBuf,

    /// Endpoint path to dispatch (e.g. /stream/status)
    pub endpoint: String,

    /// HTTP method
    #[arg(short, long, value_enum, default_value = "get")]
    pub method: Method,

    /// JSON payload for POST dispatches
    #[arg(short, long)]
    pub payload: Option<String>,

    /// Limit the dispatch to specific platforms (repeatable)
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Output the aggregate report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "streamcast.toml")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "streamcast.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show detailed platform information
    #[arg(long)]
    pub platforms: bool,
}

/// HTTP method for one-shot dispatches
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Method {
    Get,
    Post,
}

impl From<Method> for contracts::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => contracts::Method::Get,
            Method::Post => contracts::Method::Post,
        }
    }
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
