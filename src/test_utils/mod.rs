//! Shared test utilities for redact-hook.

pub mod fixtures;

use serde_json::{Value, json};

/// Table-driven test case structure.
#[derive(Debug, Clone)]
pub struct TestCase<I, E> {
    pub name: &'static str,
    pub input: I,
    pub expected: E,
    pub should_panic: bool,
}

/// Run table-driven tests, stopping at the first failing case.
pub fn run_table_tests<I, E, F>(cases: Vec<TestCase<I, E>>, test_fn: F) -> Result<(), String>
where
    I: std::fmt::Debug + Clone + std::panic::RefUnwindSafe,
    E: std::fmt::Debug + PartialEq,
    F: Fn(I) -> E + std::panic::UnwindSafe + std::panic::RefUnwindSafe,
{
    for case in cases {
        println!("[TEST] {}: {:?}", case.name, case.input);
        let outcome = std::panic::catch_unwind(|| test_fn(case.input.clone()));

        match (outcome, case.should_panic) {
            (Err(_), true) => {}
            (Ok(_), true) => return Err(format!("case '{}' expected a panic", case.name)),
            (Err(_), false) => return Err(format!("case '{}' panicked", case.name)),
            (Ok(actual), false) if actual != case.expected => {
                return Err(format!(
                    "case '{}': expected {:?}, got {:?}",
                    case.name, case.expected, actual
                ));
            }
            (Ok(_), false) => {}
        }
    }
    Ok(())
}

/// Hook payload for a pre-execution event.
pub fn pre_event(tool_name: &str, tool_input: Value) -> String {
    json!({
        "hook_event_name": "PreToolUse",
        "tool_name": tool_name,
        "tool_input": tool_input,
    })
    .to_string()
}

/// Hook payload for a post-execution event.
pub fn post_event(tool_name: &str, tool_response: Value) -> String {
    json!({
        "hook_event_name": "PostToolUse",
        "tool_name": tool_name,
        "tool_input": {},
        "tool_response": tool_response,
    })
    .to_string()
}
