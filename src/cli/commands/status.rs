//! redact-hook status - show what the hook will use on this machine

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json};
use crate::error::Result;
use crate::filter::FilterList;
use crate::hook::HookResponse;
use crate::intercept::search;

#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub filter_file: PathBuf,
    pub filter_file_exists: bool,
    /// Number of entries only. The entries themselves are never printed.
    pub filter_entries: usize,
    pub rg_path: Option<PathBuf>,
    pub search_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    pub fetch_max_chars: usize,
    pub scrubber: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_error: Option<String>,
}

impl StatusReport {
    pub fn collect(ctx: &AppContext) -> Self {
        let filters = FilterList::load(&ctx.filter_file);
        let interceptor = ctx.interceptor(None);
        Self {
            filter_file: ctx.filter_file.clone(),
            filter_file_exists: ctx.filter_file.is_file(),
            filter_entries: filters.len(),
            rg_path: search::locate(&ctx.config.search.rg_path),
            search_timeout_secs: ctx.config.search.timeout().as_secs(),
            fetch_timeout_secs: ctx.config.fetch.timeout().as_secs(),
            fetch_max_chars: ctx.config.fetch.max_chars,
            scrubber: interceptor.scrub_stage().program().to_path_buf(),
            config_error: ctx.config_error.clone(),
        }
    }

    fn layout(&self) -> HumanLayout {
        let mut layout = HumanLayout::new();
        layout
            .title("redact-hook status")
            .section("Filter list")
            .kv("Path", &self.filter_file.display().to_string())
            .kv("Exists", if self.filter_file_exists { "yes" } else { "no" })
            .kv("Entries", &self.filter_entries.to_string())
            .blank()
            .section("Collaborators")
            .kv(
                "ripgrep",
                &self
                    .rg_path
                    .as_ref()
                    .map_or_else(|| "not found".to_string(), |p| p.display().to_string()),
            )
            .kv("Search timeout", &format!("{}s", self.search_timeout_secs))
            .kv("Fetch timeout", &format!("{}s", self.fetch_timeout_secs))
            .kv("Fetch max chars", &self.fetch_max_chars.to_string())
            .kv("Scrub stage", &self.scrubber.display().to_string());
        if let Some(err) = &self.config_error {
            layout.blank().section("Config").kv("Error", err);
        }
        layout
    }
}

pub fn run(ctx: &AppContext, args: &StatusArgs) -> Result<HookResponse> {
    let report = StatusReport::collect(ctx);
    if args.json {
        emit_json(&report)?;
    } else {
        emit_human(report.layout());
    }
    Ok(HookResponse::Silent)
}
