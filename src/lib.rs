//! redact-hook library
//!
//! Pre-execution interceptors and a post-execution catch-all that keep the
//! strings listed in a local filter file out of tool output.

pub mod app;
pub mod catchall;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod hook;
pub mod intercept;
pub mod probe;
pub mod test_utils;

pub use error::{HookError, Result};
