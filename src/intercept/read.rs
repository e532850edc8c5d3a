//! File-read channel: pre-read the file and substitute a scrubbed copy.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::expand_tilde;
use crate::error::Result;
use crate::filter::{FilterList, sanitize};
use crate::hook::{PreDecision, ReadInput};
use crate::probe::Probe;

pub const SELF_READ_REASON: &str = "cannot read filter configuration file";
const READ_HEADER: &str = "[SANITIZED - filtered content removed]";

pub fn intercept(
    input: &ReadInput,
    filters: &FilterList,
    filter_file: &Path,
    cwd: Option<&Path>,
) -> PreDecision {
    if input.file_path.trim().is_empty() {
        return PreDecision::Proceed;
    }

    let target = resolve_target(&input.file_path, cwd);

    // Checked before the empty-list short circuit: the list itself is never
    // readable, even while it is empty.
    if same_location(&target, filter_file) {
        info!(path = %target.display(), "blocked read of filter list");
        return PreDecision::Deny(SELF_READ_REASON.to_string());
    }

    if filters.is_empty() || !target.is_file() {
        return PreDecision::Proceed;
    }

    let content = match Probe::from(read_lossy(&target)) {
        Probe::Ready(content) => content,
        Probe::Unavailable(reason) => {
            debug!(path = %target.display(), %reason, "pre-read failed, passing through");
            return PreDecision::Proceed;
        }
    };

    match render_redacted(&content, input.offset, input.limit, filters) {
        Some(view) => {
            info!(path = %target.display(), "read substituted with scrubbed copy");
            PreDecision::Deny(format!("{READ_HEADER}\n{view}"))
        }
        None => PreDecision::Proceed,
    }
}

/// Resolve the tool's `file_path` the way the tool would: `~/` expanded and
/// relative paths taken from the session's working directory.
pub fn resolve_target(file_path: &str, cwd: Option<&Path>) -> PathBuf {
    let path = expand_tilde(file_path);
    match cwd {
        Some(cwd) if path.is_relative() => cwd.join(path),
        _ => path,
    }
}

fn same_location(a: &Path, b: &Path) -> bool {
    canonical(a) == canonical(b)
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Scrub the whole file and render the requested window of the result with
/// one-based line numbers. `None` when the file holds no filtered string,
/// wherever it sits relative to the window.
pub fn render_redacted(
    content: &str,
    offset: Option<usize>,
    limit: Option<usize>,
    filters: &FilterList,
) -> Option<String> {
    let scrubbed = sanitize(content, filters);
    if !scrubbed.found {
        return None;
    }

    // Entries never span a newline and the marker has none, so line
    // numbers in the scrubbed text match the file.
    let start = offset.map_or(0, |line| line.saturating_sub(1));
    let numbered = scrubbed
        .text
        .split('\n')
        .enumerate()
        .skip(start)
        .take(limit.filter(|n| *n > 0).unwrap_or(usize::MAX))
        .map(|(idx, line)| format!("  {}\t{line}", idx + 1))
        .collect::<Vec<_>>()
        .join("\n");
    Some(numbered)
}
