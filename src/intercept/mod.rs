//! Pre-execution interception.
//!
//! Each channel reproduces (or wraps) the tool's operation out of band and
//! decides whether the real call may proceed. All four share the literal
//! sanitize primitive from [`crate::filter`].

pub mod command;
pub mod fetch;
pub mod html;
pub mod read;
pub mod search;

use std::path::PathBuf;

use tracing::debug;

use crate::config::{Config, FetchConfig};
use crate::filter::FilterList;
use crate::hook::{PreDecision, ToolCall};

pub use command::ScrubStage;
pub use search::SearchRunner;

/// Per-invocation settings for the channel handlers.
#[derive(Debug, Clone)]
pub struct Interceptor {
    filter_file: PathBuf,
    cwd: Option<PathBuf>,
    scrub_stage: ScrubStage,
    search: SearchRunner,
    fetch: FetchConfig,
}

impl Interceptor {
    pub fn from_config(config: &Config, filter_file: PathBuf, cwd: Option<PathBuf>) -> Self {
        Self {
            scrub_stage: ScrubStage::resolve(config.command.scrubber_path.as_deref(), &filter_file),
            search: SearchRunner::new(config.search.rg_path.clone(), config.search.timeout()),
            fetch: config.fetch.clone(),
            filter_file,
            cwd,
        }
    }

    pub const fn scrub_stage(&self) -> &ScrubStage {
        &self.scrub_stage
    }

    pub fn decide(&self, call: &ToolCall, filters: &FilterList) -> PreDecision {
        debug!(channel = call.channel(), filters = filters.len(), "pre-execution check");
        match call {
            // The read channel guards the filter file itself, so it runs even
            // when the list is empty.
            ToolCall::Read(input) => {
                read::intercept(input, filters, &self.filter_file, self.cwd.as_deref())
            }
            _ if filters.is_empty() => PreDecision::Proceed,
            ToolCall::Bash(input) => command::intercept(input, filters, &self.scrub_stage),
            ToolCall::Grep(input) => {
                search::intercept(input, filters, &self.search, self.cwd.as_deref())
            }
            ToolCall::WebFetch(input) => fetch::intercept(input, filters, &self.fetch),
            ToolCall::Other { .. } => PreDecision::Proceed,
        }
    }
}
