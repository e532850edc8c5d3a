//! redact-hook pre - decide whether a tool call may run as-is

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::error::Result;
use crate::filter::FilterList;
use crate::hook::{HookEvent, HookResponse, PreDecision};

#[derive(Args, Debug, Default)]
pub struct PreArgs {
    /// Read the hook event from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &PreArgs) -> Result<HookResponse> {
    let payload = super::read_payload(args.input_file.as_deref())?;
    Ok(HookResponse::Pre(evaluate(ctx, &payload)))
}

/// Full pre-execution pass over one raw payload.
pub fn evaluate(ctx: &AppContext, payload: &str) -> PreDecision {
    let Some(event) = HookEvent::parse(payload) else {
        return PreDecision::Proceed;
    };
    let call = event.tool_call();
    debug!(tool = %event.tool_name, channel = call.channel(), "pre-execution event");

    let filters = FilterList::load(&ctx.filter_file);
    ctx.interceptor(event.cwd.clone()).decide(&call, &filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::UnitTestFixture;
    use crate::intercept::read::SELF_READ_REASON;
    use crate::test_utils::pre_event;
    use serde_json::json;

    #[test]
    fn malformed_payload_proceeds() {
        let fixture = UnitTestFixture::new();
        let ctx = AppContext::for_filter_file(fixture.data_path.join("filters.txt"));
        assert_eq!(evaluate(&ctx, "{not json"), PreDecision::Proceed);
    }

    #[test]
    fn missing_filter_list_proceeds() {
        let fixture = UnitTestFixture::new();
        let ctx = AppContext::for_filter_file(fixture.data_path.join("filters.txt"));
        let payload = pre_event("Bash", json!({"command": "ls"}));
        assert_eq!(evaluate(&ctx, &payload), PreDecision::Proceed);
    }

    #[test]
    fn dirty_read_is_denied() {
        let fixture = UnitTestFixture::new();
        let filter_file = fixture.create_filter_file(&["SECRET"]);
        let target = fixture.create_file("notes.md", "the SECRET is here");
        let ctx = AppContext::for_filter_file(filter_file);
        let payload = pre_event("Read", json!({"file_path": target.display().to_string()}));
        let PreDecision::Deny(reason) = evaluate(&ctx, &payload) else {
            panic!("expected deny");
        };
        assert!(reason.contains("the [FILTERED] is here"));
    }

    #[test]
    fn filter_file_is_guarded_despite_bad_window() {
        let fixture = UnitTestFixture::new();
        let filter_file = fixture.create_filter_file(&["SECRET"]);
        let ctx = AppContext::for_filter_file(filter_file.clone());
        for offset in [json!(-1), json!("5"), json!(1.5)] {
            let payload = pre_event(
                "Read",
                json!({"file_path": filter_file.display().to_string(), "offset": offset}),
            );
            assert_eq!(
                evaluate(&ctx, &payload),
                PreDecision::Deny(SELF_READ_REASON.to_string()),
                "offset {offset}"
            );
        }
    }
}
