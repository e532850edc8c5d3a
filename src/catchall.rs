//! Post-execution catch-all.
//!
//! Runs after every tool call. MCP tool output can be swapped wholesale;
//! built-in tool output can only be annotated, so for those this is a
//! best-effort backstop rather than a guarantee.

use serde_json::Value;
use tracing::info;

use crate::filter::{FilterList, contains_any, redact_value, sanitize, value_contains_any};
use crate::hook::{PostDecision, is_pluggable_tool};

const ANNOTATION_HEADER: &str = "[SANITIZED OUTPUT]";

pub fn decide(tool_name: &str, output: Option<&Value>, filters: &FilterList) -> PostDecision {
    let Some(output) = output else {
        return PostDecision::NoAction;
    };
    if filters.is_empty() {
        return PostDecision::NoAction;
    }

    let serialized = comparable_text(output);
    if !contains_any(&serialized, filters) && !value_contains_any(output, filters) {
        return PostDecision::NoAction;
    }

    let redacted = redact_value(output, filters);
    if is_pluggable_tool(tool_name) {
        info!(tool = tool_name, "replacing pluggable tool output");
        return PostDecision::Replace(redacted);
    }

    info!(tool = tool_name, "annotating built-in tool output");
    let text = sanitize(&comparable_text(&redacted), filters).text;
    PostDecision::Annotate(format!("{ANNOTATION_HEADER}\n{text}"))
}

/// Strings as-is, everything else as compact JSON.
pub fn comparable_text(output: &Value) -> String {
    match output {
        Value::String(text) => text.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
