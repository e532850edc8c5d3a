//! Inbound hook payloads.
//!
//! The caller sends one JSON object per invocation. Parameters are decoded
//! into a typed [`ToolCall`] once, here, so channel handlers never poke at
//! loosely-typed maps.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// One hook event as received on stdin.
#[derive(Debug, Clone, Deserialize)]
pub struct HookEvent {
    #[serde(default)]
    pub tool_name: String,
    #[serde(default)]
    pub tool_input: Value,
    #[serde(default, alias = "tool_output")]
    pub tool_response: Option<Value>,
    #[serde(default)]
    pub cwd: Option<PathBuf>,
}

impl HookEvent {
    /// Parse an event, returning `None` for anything that is not a JSON
    /// object with the expected shape.
    pub fn parse(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Self>(raw) {
            Ok(event) => Some(event),
            Err(err) => {
                debug!(error = %err, "ignoring malformed hook payload");
                None
            }
        }
    }

    pub fn tool_call(&self) -> ToolCall {
        ToolCall::decode(&self.tool_name, &self.tool_input)
    }

    pub fn is_pluggable_tool(&self) -> bool {
        is_pluggable_tool(&self.tool_name)
    }
}

/// Tools served by external MCP servers carry this prefix.
pub const PLUGGABLE_TOOL_PREFIX: &str = "mcp__";

pub fn is_pluggable_tool(tool_name: &str) -> bool {
    tool_name.starts_with(PLUGGABLE_TOOL_PREFIX)
}

/// Typed view of the tool being invoked.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    Read(ReadInput),
    Bash(BashInput),
    Grep(GrepInput),
    WebFetch(WebFetchInput),
    Other { tool_name: String },
}

impl ToolCall {
    pub fn decode(tool_name: &str, input: &Value) -> Self {
        let decoded = match tool_name {
            "Read" => serde_json::from_value(input.clone()).map(Self::Read),
            "Bash" => serde_json::from_value(input.clone()).map(Self::Bash),
            "Grep" => serde_json::from_value(input.clone()).map(Self::Grep),
            "WebFetch" => serde_json::from_value(input.clone()).map(Self::WebFetch),
            _ => {
                return Self::Other {
                    tool_name: tool_name.to_string(),
                };
            }
        };
        decoded.unwrap_or_else(|err| {
            debug!(tool = tool_name, error = %err, "tool input did not decode");
            Self::Other {
                tool_name: tool_name.to_string(),
            }
        })
    }

    pub fn channel(&self) -> &'static str {
        match self {
            Self::Read(_) => "read",
            Self::Bash(_) => "command",
            Self::Grep(_) => "search",
            Self::WebFetch(_) => "fetch",
            Self::Other { .. } => "other",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReadInput {
    #[serde(default)]
    pub file_path: String,
    /// One-based line to start from.
    #[serde(default, deserialize_with = "lenient::count")]
    pub offset: Option<usize>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub limit: Option<usize>,
}

/// Bash parameters. Everything besides `command` is carried through a
/// rewrite untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BashInput {
    #[serde(default)]
    pub command: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BashInput {
    /// Same parameters with `command` replaced.
    pub fn with_command(&self, command: String) -> Self {
        Self {
            command,
            extra: self.extra.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    FilesWithMatches,
    Content,
    Count,
}

impl OutputMode {
    /// Anything other than the two listing modes prints matching lines.
    pub fn from_name(name: &str) -> Self {
        match name {
            "files_with_matches" => Self::FilesWithMatches,
            "count" => Self::Count,
            _ => Self::Content,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GrepInput {
    #[serde(default)]
    pub pattern: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub glob: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient::text")]
    pub file_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::output_mode")]
    pub output_mode: Option<OutputMode>,
    #[serde(default, rename = "-i", deserialize_with = "lenient::flag")]
    pub case_insensitive: Option<bool>,
    #[serde(default, rename = "-n", deserialize_with = "lenient::flag")]
    pub line_numbers: Option<bool>,
    #[serde(default, rename = "-A", deserialize_with = "lenient::lines")]
    pub after_context: Option<u32>,
    #[serde(default, rename = "-B", deserialize_with = "lenient::lines")]
    pub before_context: Option<u32>,
    #[serde(default, rename = "-C", deserialize_with = "lenient::lines")]
    pub context_short: Option<u32>,
    #[serde(default, deserialize_with = "lenient::lines")]
    pub context: Option<u32>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub multiline: Option<bool>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub offset: Option<usize>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub head_limit: Option<usize>,
}

impl GrepInput {
    pub fn mode(&self) -> OutputMode {
        self.output_mode.unwrap_or_default()
    }

    /// Symmetric context, preferring `context` over `-C`. Zero means unset.
    pub fn symmetric_context(&self) -> Option<u32> {
        self.context
            .or(self.context_short)
            .filter(|lines| *lines > 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebFetchInput {
    #[serde(default)]
    pub url: String,
}

/// Field decoders that turn an ill-typed optional parameter into `None`
/// instead of failing the whole tool input. A stray `"offset": -1` must not
/// knock a call off its channel.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::OutputMode;

    fn number(value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn count<'de, D: Deserializer<'de>>(de: D) -> Result<Option<usize>, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(number(&value).and_then(|n| usize::try_from(n).ok()))
    }

    pub fn lines<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(de)?;
        Ok(number(&value).and_then(|n| u32::try_from(n).ok()))
    }

    pub fn flag<'de, D: Deserializer<'de>>(de: D) -> Result<Option<bool>, D::Error> {
        Ok(match Value::deserialize(de)? {
            Value::Bool(b) => Some(b),
            Value::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_u64().map(|n| n != 0),
            _ => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(de)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn output_mode<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<OutputMode>, D::Error> {
        Ok(match Value::deserialize(de)? {
            Value::String(s) => Some(OutputMode::from_name(&s)),
            _ => None,
        })
    }
}
