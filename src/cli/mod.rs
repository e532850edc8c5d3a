//! Command-line surface.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "redact-hook",
    version,
    about = "Keep configured strings out of tool output seen by a coding agent",
    propagate_version = true
)]
pub struct Cli {
    /// Filter list to use instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub filter_file: Option<PathBuf>,

    /// Config file (default: <config dir>/redact-hook/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable logging entirely
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
