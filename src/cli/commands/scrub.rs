//! redact-hook scrub - the stage appended to rewritten shell commands
//!
//! Reads stdin to the end, replaces every filter string, and writes the
//! result to stdout. Bytes that are not valid UTF-8 pass through untouched.

use std::io::{Read, Write};

use clap::Args;
use tracing::debug;

use crate::app::AppContext;
use crate::error::Result;
use crate::filter::{FilterList, scrub_bytes};
use crate::hook::HookResponse;

#[derive(Args, Debug, Default)]
pub struct ScrubArgs {}

pub fn run(ctx: &AppContext, _args: &ScrubArgs) -> Result<HookResponse> {
    let filters = FilterList::load(&ctx.filter_file);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    scrub_stream(&mut stdin.lock(), &mut stdout.lock(), &filters)?;
    Ok(HookResponse::Silent)
}

/// Copy `input` to `output`, replacing filter strings on the way.
pub fn scrub_stream<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    filters: &FilterList,
) -> Result<()> {
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;

    match scrub_bytes(&buf, filters) {
        Some(scrubbed) => {
            debug!(bytes = buf.len(), "scrubbed command output");
            output.write_all(&scrubbed)?;
        }
        None => output.write_all(&buf)?,
    }
    output.flush()?;
    Ok(())
}
