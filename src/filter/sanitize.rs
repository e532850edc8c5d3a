//! Literal substring scrubbing.
//!
//! Filter entries are never compiled as patterns. Every entry is checked and
//! replaced, so text carrying several distinct entries is fully scrubbed in
//! one call.

use memchr::memmem;

use super::FilterList;

/// Replacement written in place of every filter match.
pub const FILTER_MARKER: &str = "[FILTERED]";

/// Upper bound on follow-up passes. Each pass only runs when the previous
/// one recreated an entry across a marker boundary.
const MAX_PASSES: usize = 8;

/// Outcome of [`sanitize`]. When `found` is false `text` equals the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    pub found: bool,
}

/// Replace every entry with [`FILTER_MARKER`].
///
/// A replacement can complete an earlier entry, as with `]Z` after `QZ`
/// becomes `[FILTERED]Z`, so passes repeat until the text is stable. Entries
/// that occur inside the marker itself only take part in the first pass;
/// they would otherwise match their own replacement forever.
pub fn sanitize(text: &str, filters: &FilterList) -> Sanitized {
    let (mut current, found) = text_pass(text.to_owned(), filters.iter());
    if found {
        let repeatable = repeatable_entries(filters);
        for _ in 0..MAX_PASSES {
            let (next, again) = text_pass(current, repeatable.iter().copied());
            current = next;
            if !again {
                break;
            }
        }
    }
    Sanitized {
        text: current,
        found,
    }
}

fn text_pass<'a>(mut current: String, entries: impl Iterator<Item = &'a str>) -> (String, bool) {
    let mut found = false;
    for entry in entries {
        if current.contains(entry) {
            found = true;
            current = current.replace(entry, FILTER_MARKER);
        }
    }
    (current, found)
}

fn repeatable_entries(filters: &FilterList) -> Vec<&str> {
    filters
        .iter()
        .filter(|entry| !FILTER_MARKER.contains(entry))
        .collect()
}

pub fn contains_any(text: &str, filters: &FilterList) -> bool {
    filters.iter().any(|entry| text.contains(entry))
}

/// Byte-level counterpart of [`sanitize`] for streams that may not be UTF-8.
///
/// Returns `None` when no entry occurs, so callers can pass the original
/// buffer through untouched.
pub fn scrub_bytes(input: &[u8], filters: &FilterList) -> Option<Vec<u8>> {
    let mut current = byte_pass(input, filters.iter())?;
    let repeatable = repeatable_entries(filters);
    for _ in 0..MAX_PASSES {
        match byte_pass(&current, repeatable.iter().copied()) {
            Some(next) => current = next,
            None => break,
        }
    }
    Some(current)
}

fn byte_pass<'a>(input: &[u8], entries: impl Iterator<Item = &'a str>) -> Option<Vec<u8>> {
    let mut current: Option<Vec<u8>> = None;
    for entry in entries {
        let needle = entry.as_bytes();
        let haystack = current.as_deref().unwrap_or(input);
        if memmem::find(haystack, needle).is_none() {
            continue;
        }
        current = Some(replace_all(haystack, needle, FILTER_MARKER.as_bytes()));
    }
    current
}

fn replace_all(haystack: &[u8], needle: &[u8], with: &[u8]) -> Vec<u8> {
    let finder = memmem::Finder::new(needle);
    let mut out = Vec::with_capacity(haystack.len());
    let mut last = 0;
    for pos in finder.find_iter(haystack) {
        if pos < last {
            continue;
        }
        out.extend_from_slice(&haystack[last..pos]);
        out.extend_from_slice(with);
        last = pos + needle.len();
    }
    out.extend_from_slice(&haystack[last..]);
    out
}
