//! Text-search channel: re-run the search with ripgrep and inspect it.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::HookError;
use crate::filter::{FilterList, sanitize};
use crate::hook::{GrepInput, OutputMode, PreDecision};
use crate::probe::{Probe, run_with_timeout};

const SEARCH_HEADER: &str = "[SANITIZED - filtered content removed from search results]";

#[derive(Debug, Clone)]
pub struct SearchRunner {
    program: String,
    timeout: Duration,
}

impl SearchRunner {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Execute the equivalent `rg` invocation and capture stdout then stderr.
    pub fn run(&self, input: &GrepInput, cwd: Option<&Path>) -> Probe<String> {
        let program = match which::which(&self.program) {
            Ok(path) => path,
            Err(err) => return Probe::Unavailable(format!("{}: {err}", self.program)),
        };

        let mut cmd = Command::new(program);
        cmd.args(build_args(input));
        if let Some(dir) = cwd.filter(|dir| dir.is_dir()) {
            cmd.current_dir(dir);
        }

        Probe::from(
            run_with_timeout(&mut cmd, self.timeout).and_then(|output| match output.status {
                // 0 = matches, 1 = no matches; 2 still carries whatever was found.
                Some(_) => Ok(output.combined_text()),
                None => Err(HookError::Process("rg terminated by signal".to_string())),
            }),
        )
    }
}

/// Translate the tool's parameters into ripgrep arguments. No shell is
/// involved; every value is passed as its own argument.
pub fn build_args(input: &GrepInput) -> Vec<String> {
    let mode = input.mode();
    let mut args = vec!["--no-config".to_string()];

    match mode {
        OutputMode::FilesWithMatches => args.push("-l".to_string()),
        OutputMode::Count => args.push("-c".to_string()),
        OutputMode::Content => {}
    }

    if input.case_insensitive.unwrap_or(false) {
        args.push("-i".to_string());
    }
    if mode == OutputMode::Content && input.line_numbers.unwrap_or(true) {
        args.push("-n".to_string());
    }
    if input.multiline.unwrap_or(false) {
        args.push("-U".to_string());
        args.push("--multiline-dotall".to_string());
    }

    if mode == OutputMode::Content {
        if let Some(lines) = input.symmetric_context() {
            args.push("-C".to_string());
            args.push(lines.to_string());
        } else {
            if let Some(lines) = input.after_context.filter(|n| *n > 0) {
                args.push("-A".to_string());
                args.push(lines.to_string());
            }
            if let Some(lines) = input.before_context.filter(|n| *n > 0) {
                args.push("-B".to_string());
                args.push(lines.to_string());
            }
        }
    }

    if let Some(glob) = input.glob.as_deref().filter(|g| !g.is_empty()) {
        args.push("--glob".to_string());
        args.push(glob.to_string());
    }
    if let Some(file_type) = input.file_type.as_deref().filter(|t| !t.is_empty()) {
        args.push("--type".to_string());
        args.push(file_type.to_string());
    }

    args.push("--regexp".to_string());
    args.push(input.pattern.clone());
    args.push("--".to_string());
    args.push(
        input
            .path
            .as_deref()
            .filter(|p| !p.is_empty())
            .map_or_else(|| ".".to_string(), str::to_string),
    );
    args
}

/// Scrub captured search output and apply the tool's paging. `None` when
/// nothing needed scrubbing.
pub fn redacted_results(
    output: &str,
    filters: &FilterList,
    offset: usize,
    head_limit: usize,
) -> Option<String> {
    let scrubbed = sanitize(output, filters);
    if !scrubbed.found {
        return None;
    }
    let limit = if head_limit == 0 { usize::MAX } else { head_limit };
    let sliced = scrubbed
        .text
        .split('\n')
        .skip(offset)
        .take(limit)
        .collect::<Vec<_>>()
        .join("\n");
    Some(sliced)
}

pub fn intercept(
    input: &GrepInput,
    filters: &FilterList,
    runner: &SearchRunner,
    cwd: Option<&Path>,
) -> PreDecision {
    if input.pattern.is_empty() {
        return PreDecision::Proceed;
    }

    let output = match runner.run(input, cwd) {
        Probe::Ready(output) => output,
        Probe::Unavailable(reason) => {
            debug!(%reason, "search replay unavailable, passing through");
            return PreDecision::Proceed;
        }
    };

    match redacted_results(
        &output,
        filters,
        input.offset.unwrap_or(0),
        input.head_limit.unwrap_or(0),
    ) {
        Some(results) => {
            info!("search results substituted with scrubbed copy");
            PreDecision::Deny(format!("{SEARCH_HEADER}\n{results}"))
        }
        None => PreDecision::Proceed,
    }
}

/// Resolved location of the search binary, if any.
pub fn locate(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}
