//! Out-of-band collaborators used to reproduce a tool's result.
//!
//! Each call resolves to a [`Probe`]; channel handlers treat
//! [`Probe::Unavailable`] as "let the real tool run".

pub mod http;
pub mod process;

use crate::error::Result;

pub use http::Fetcher;
pub use process::{CapturedOutput, run_with_timeout};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe<T> {
    Ready(T),
    Unavailable(String),
}

impl<T> From<Result<T>> for Probe<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => Self::Unavailable(err.to_string()),
        }
    }
}
