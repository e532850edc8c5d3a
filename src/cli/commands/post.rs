//! redact-hook post - backstop over completed tool output

use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::catchall;
use crate::error::Result;
use crate::filter::FilterList;
use crate::hook::{HookEvent, HookResponse, PostDecision};

#[derive(Args, Debug, Default)]
pub struct PostArgs {
    /// Read the hook event from a file instead of stdin
    #[arg(long, value_name = "PATH")]
    pub input_file: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &PostArgs) -> Result<HookResponse> {
    let payload = super::read_payload(args.input_file.as_deref())?;
    Ok(HookResponse::Post(evaluate(ctx, &payload)))
}

pub fn evaluate(ctx: &AppContext, payload: &str) -> PostDecision {
    let Some(event) = HookEvent::parse(payload) else {
        return PostDecision::NoAction;
    };
    debug!(
        tool = %event.tool_name,
        pluggable = event.is_pluggable_tool(),
        "post-execution event"
    );

    let filters = FilterList::load(&ctx.filter_file);
    catchall::decide(&event.tool_name, event.tool_response.as_ref(), &filters)
}
