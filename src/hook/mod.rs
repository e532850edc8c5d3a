//! Hook wire protocol: inbound events and outbound decisions.

pub mod event;
pub mod response;

pub use event::{
    BashInput, GrepInput, HookEvent, OutputMode, ReadInput, ToolCall, WebFetchInput,
    is_pluggable_tool,
};
pub use response::{EXIT_DENY, HookResponse, PostDecision, PreDecision};
