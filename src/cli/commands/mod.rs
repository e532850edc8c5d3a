//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use std::io::Read;
use std::path::Path;

use clap::Subcommand;

pub mod post;
pub mod pre;
pub mod scrub;
pub mod status;

use crate::app::AppContext;
use crate::error::Result;
use crate::hook::HookResponse;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Pre-execution interceptor (PreToolUse hook)
    Pre(pre::PreArgs),

    /// Post-execution catch-all (PostToolUse hook)
    Post(post::PostArgs),

    /// Scrub stdin to stdout using the filter list on disk
    Scrub(scrub::ScrubArgs),

    /// Show where the filter list lives and what the hook will use
    Status(status::StatusArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<HookResponse> {
    match command {
        Commands::Pre(args) => pre::run(ctx, args),
        Commands::Post(args) => post::run(ctx, args),
        Commands::Scrub(args) => scrub::run(ctx, args),
        Commands::Status(args) => status::run(ctx, args),
    }
}

/// Read the hook payload from `input_file`, or stdin when absent.
pub(crate) fn read_payload(input_file: Option<&Path>) -> Result<String> {
    if let Some(path) = input_file {
        let bytes = std::fs::read(path)?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    let mut buf = Vec::new();
    std::io::stdin().lock().read_to_end(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
