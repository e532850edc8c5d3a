//! Shell-command channel.
//!
//! Output does not exist yet, so the command is rewritten to pipe stdout and
//! stderr through `redact-hook scrub`, a separate process that loads the
//! filter list from disk when it runs. The rewritten text only names the
//! filter file; it never carries the entries themselves.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::expand_tilde;
use crate::filter::FilterList;
use crate::hook::{BashInput, PreDecision};

const FALLBACK_PROGRAM: &str = "redact-hook";

/// The second-stage process every rewritten command pipes into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrubStage {
    program: PathBuf,
    filter_file: PathBuf,
}

impl ScrubStage {
    pub fn new(program: impl Into<PathBuf>, filter_file: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            filter_file: filter_file.into(),
        }
    }

    /// Pick the scrubber binary: the configured one, else this executable,
    /// else whatever `redact-hook` resolves to on `PATH`.
    pub fn resolve(configured: Option<&str>, filter_file: &Path) -> Self {
        let program = configured
            .map(expand_tilde)
            .or_else(|| std::env::current_exe().ok())
            .unwrap_or_else(|| PathBuf::from(FALLBACK_PROGRAM));
        Self::new(program, filter_file)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Wrap `command` so its combined output passes through the scrubber.
    ///
    /// The user command sits on its own lines so a trailing comment or
    /// heredoc cannot swallow the closing parenthesis.
    pub fn wrap(&self, command: &str) -> String {
        let program = self.program.to_string_lossy();
        let filter_file = self.filter_file.to_string_lossy();
        format!(
            "(\n{command}\n) 2>&1 | {} --quiet scrub --filter-file {}",
            shell_words::quote(&program),
            shell_words::quote(&filter_file),
        )
    }
}

/// Always rewrites a non-empty command; this channel cannot deny because the
/// command's side effects happen regardless of its output.
pub fn intercept(input: &BashInput, filters: &FilterList, stage: &ScrubStage) -> PreDecision {
    if input.command.trim().is_empty() || filters.is_empty() {
        return PreDecision::Proceed;
    }

    let rewritten = input.with_command(stage.wrap(&input.command));
    match serde_json::to_value(&rewritten) {
        Ok(value) => {
            info!(scrubber = %stage.program.display(), "command wrapped with scrub stage");
            PreDecision::Rewrite(value)
        }
        Err(err) => {
            debug!(error = %err, "could not encode rewritten input");
            PreDecision::Proceed
        }
    }
}
