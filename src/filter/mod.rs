//! Filter list loading and the redaction primitives built on it.
//!
//! The filter list is a newline-delimited file of literal strings. It is read
//! fresh for every hook invocation and threaded through the channel handlers
//! as a plain value; nothing here caches across calls.

pub mod redact;
pub mod sanitize;

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, warn};

pub use redact::{redact_value, value_contains_any};
pub use sanitize::{FILTER_MARKER, Sanitized, contains_any, sanitize, scrub_bytes};

/// Ordered, de-duplicated set of literal filter strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterList {
    entries: Vec<String>,
}

impl FilterList {
    /// Build a list from arbitrary entries, applying the same normalization
    /// as [`FilterList::parse`].
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for entry in entries {
            let trimmed = entry.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_string()) {
                out.push(trimmed.to_string());
            }
        }
        Self { entries: out }
    }

    /// Parse the on-disk format: one entry per line, trimmed, blanks skipped.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.lines())
    }

    /// Load the list from `path`.
    ///
    /// A missing or unreadable file yields an empty list, which turns every
    /// channel into a no-op.
    pub fn load(path: &Path) -> Self {
        match std::fs::read(path) {
            Ok(bytes) => {
                let list = Self::parse(&String::from_utf8_lossy(&bytes));
                debug!(path = %path.display(), entries = list.len(), "loaded filter list");
                list
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "filter list not present");
                Self::default()
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "filter list unreadable");
                Self::default()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
