//! Web-fetch channel: pre-fetch the page and substitute flattened text.

use tracing::{debug, info};

use super::html::{flatten, truncate_chars};
use crate::config::FetchConfig;
use crate::filter::{FilterList, contains_any, sanitize};
use crate::hook::{PreDecision, WebFetchInput};
use crate::probe::{Fetcher, Probe};

const FETCH_HEADER: &str = "[SANITIZED - filtered content removed from web content]";

pub fn fetch_body(url: &str, settings: &FetchConfig) -> Probe<String> {
    Probe::from(
        Fetcher::new(settings.timeout(), &settings.user_agent)
            .and_then(|fetcher| fetcher.get_text(url)),
    )
}

/// Build the substitute page text, or `None` when the raw body is clean.
///
/// Detection runs on the raw body so matches hidden in attributes or
/// scripts still trigger a substitution.
pub fn redacted_page(
    url: &str,
    body: &str,
    filters: &FilterList,
    max_chars: usize,
) -> Option<String> {
    if !contains_any(body, filters) {
        return None;
    }
    let text = sanitize(&flatten(body), filters).text;
    let text = truncate_chars(&text, max_chars);
    Some(format!("{FETCH_HEADER}\nURL: {url}\n\n{text}"))
}

pub fn intercept(
    input: &WebFetchInput,
    filters: &FilterList,
    settings: &FetchConfig,
) -> PreDecision {
    if input.url.trim().is_empty() {
        return PreDecision::Proceed;
    }

    let body = match fetch_body(&input.url, settings) {
        Probe::Ready(body) => body,
        Probe::Unavailable(reason) => {
            debug!(%reason, "pre-fetch unavailable, passing through");
            return PreDecision::Proceed;
        }
    };

    match redacted_page(&input.url, &body, filters, settings.max_chars) {
        Some(page) => {
            info!(url = %input.url, "fetched page substituted with scrubbed text");
            PreDecision::Deny(page)
        }
        None => PreDecision::Proceed,
    }
}
