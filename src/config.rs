use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{HookError, Result};

pub const DEFAULT_FILTER_FILE: &str = "~/.claude/filter-string.txt";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (redact-hook)";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub command: CommandConfig,
}

impl Config {
    /// Load configuration: defaults, then the TOML file, then `REDACT_HOOK_*`
    /// environment overrides.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("REDACT_HOOK_CONFIG").ok().map(PathBuf::from));

        let path = explicit.or_else(default_config_path);
        if let Some(path) = path {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| HookError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| HookError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.filter {
            self.filter.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.fetch {
            self.fetch.merge(patch);
        }
        if let Some(patch) = patch.command {
            self.command.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("REDACT_HOOK_FILTER_FILE") {
            self.filter.path = value;
        }

        if let Some(value) = env_string("REDACT_HOOK_RG_PATH") {
            self.search.rg_path = value;
        }
        if let Some(value) = env_u64("REDACT_HOOK_SEARCH_TIMEOUT_SECS")? {
            self.search.timeout_secs = value;
        }

        if let Some(value) = env_u64("REDACT_HOOK_FETCH_TIMEOUT_SECS")? {
            self.fetch.timeout_secs = value;
        }
        if let Some(value) = env_string("REDACT_HOOK_FETCH_USER_AGENT") {
            self.fetch.user_agent = value;
        }
        if let Some(value) = env_usize("REDACT_HOOK_FETCH_MAX_CHARS")? {
            self.fetch.max_chars = value;
        }

        if let Some(value) = env_string("REDACT_HOOK_SCRUBBER_PATH") {
            self.command.scrubber_path = Some(value);
        }

        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("redact-hook/config.toml"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Newline-delimited filter list. `~/` is expanded.
    #[serde(default)]
    pub path: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_FILTER_FILE.to_string(),
        }
    }
}

impl FilterConfig {
    fn merge(&mut self, patch: FilterPatch) {
        if let Some(value) = patch.path {
            self.path = value;
        }
    }

    pub fn resolved_path(&self) -> PathBuf {
        expand_tilde(&self.path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub rg_path: String,
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rg_path: "rg".to_string(),
            timeout_secs: 30,
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.rg_path {
            self.rg_path = value;
        }
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default)]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: String,
    /// Character ceiling for flattened page text.
    #[serde(default)]
    pub max_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_chars: 30_000,
        }
    }
}

impl FetchConfig {
    fn merge(&mut self, patch: FetchPatch) {
        if let Some(value) = patch.timeout_secs {
            self.timeout_secs = value;
        }
        if let Some(value) = patch.user_agent {
            self.user_agent = value;
        }
        if let Some(value) = patch.max_chars {
            self.max_chars = value;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Binary used as the scrub stage. Defaults to the running executable.
    #[serde(default)]
    pub scrubber_path: Option<String>,
}

impl CommandConfig {
    fn merge(&mut self, patch: CommandPatch) {
        if let Some(value) = patch.scrubber_path {
            self.scrubber_path = Some(value);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub filter: Option<FilterPatch>,
    pub search: Option<SearchPatch>,
    pub fetch: Option<FetchPatch>,
    pub command: Option<CommandPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FilterPatch {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub rg_path: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FetchPatch {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub max_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CommandPatch {
    pub scrubber_path: Option<String>,
}

pub fn expand_tilde(input: &str) -> PathBuf {
    if let Some(stripped) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(input)
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            HookError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<usize>().map(Some).map_err(|err| {
            HookError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
