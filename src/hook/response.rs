//! Outbound decisions and their wire encoding.

use serde::Serialize;
use serde_json::Value;

/// Exit status for a blocking deny.
pub const EXIT_DENY: u8 = 2;

/// Decision of the pre-execution interceptor.
#[derive(Debug, Clone, PartialEq)]
pub enum PreDecision {
    Proceed,
    /// Allow with replacement tool parameters. Only the command channel
    /// produces this.
    Rewrite(Value),
    Deny(String),
}

/// Decision of the post-execution catch-all.
#[derive(Debug, Clone, PartialEq)]
pub enum PostDecision {
    NoAction,
    /// Swap the producer's output for this value.
    Replace(Value),
    /// Append this text as supplementary context.
    Annotate(String),
}

/// What a subcommand hands back to `main`.
#[derive(Debug, Clone, PartialEq)]
pub enum HookResponse {
    Pre(PreDecision),
    Post(PostDecision),
    /// The command already wrote whatever it needed to.
    Silent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    hook_specific_output: HookSpecificOutput,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct HookSpecificOutput {
    hook_event_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission_decision: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    permission_decision_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated_input: Option<Value>,
    #[serde(
        rename = "updatedMCPToolOutput",
        skip_serializing_if = "Option::is_none"
    )]
    updated_mcp_tool_output: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    additional_context: Option<String>,
}

impl HookResponse {
    /// JSON to print on stdout, or `None` when nothing should be printed.
    pub fn to_json(&self) -> Option<Value> {
        let output = match self {
            Self::Pre(PreDecision::Proceed)
            | Self::Post(PostDecision::NoAction)
            | Self::Silent => return None,
            Self::Pre(PreDecision::Rewrite(input)) => HookSpecificOutput {
                hook_event_name: "PreToolUse",
                permission_decision: Some("allow"),
                updated_input: Some(input.clone()),
                ..HookSpecificOutput::default()
            },
            Self::Pre(PreDecision::Deny(reason)) => HookSpecificOutput {
                hook_event_name: "PreToolUse",
                permission_decision: Some("deny"),
                permission_decision_reason: Some(reason.clone()),
                ..HookSpecificOutput::default()
            },
            Self::Post(PostDecision::Replace(value)) => HookSpecificOutput {
                hook_event_name: "PostToolUse",
                updated_mcp_tool_output: Some(value.clone()),
                ..HookSpecificOutput::default()
            },
            Self::Post(PostDecision::Annotate(text)) => HookSpecificOutput {
                hook_event_name: "PostToolUse",
                additional_context: Some(text.clone()),
                ..HookSpecificOutput::default()
            },
        };
        serde_json::to_value(Envelope {
            hook_specific_output: output,
        })
        .ok()
    }

    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Pre(PreDecision::Deny(_)) => EXIT_DENY,
            _ => 0,
        }
    }

    /// Reason text for blocking outcomes.
    pub fn blocking_reason(&self) -> Option<&str> {
        match self {
            Self::Pre(PreDecision::Deny(reason)) => Some(reason.as_str()),
            _ => None,
        }
    }
}
