//! redact-hook - tool-use hooks for a coding agent
//!
//! Keeps strings from a local filter list out of the output the agent sees.

use std::process::ExitCode;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use redact_hook::app::AppContext;
use redact_hook::cli::output::emit_json_line;
use redact_hook::cli::{Cli, LogFormat};
use redact_hook::hook::HookResponse;

fn main() -> ExitCode {
    // clap exits with 2 on a usage error, which the caller reads as a deny.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(&cli);

    let ctx = AppContext::from_cli(&cli);
    match redact_hook::cli::commands::run(&ctx, &cli.command) {
        Ok(response) => finish(&response),
        Err(e) => {
            // Any failure inside the hook must look like the hook was absent.
            warn!(error = %e, "hook failed, letting the tool call through");
            ExitCode::SUCCESS
        }
    }
}

fn finish(response: &HookResponse) -> ExitCode {
    if let Some(json) = response.to_json() {
        if let Err(e) = emit_json_line(&json) {
            warn!(error = %e, "could not write hook response");
            return ExitCode::SUCCESS;
        }
    }
    if let Some(reason) = response.blocking_reason() {
        eprintln!("{reason}");
    }
    ExitCode::from(response.exit_code())
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info,redact_hook=debug",
        2 => "debug,redact_hook=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
