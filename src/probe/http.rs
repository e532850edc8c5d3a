//! Blocking HTTP fetch used by the web channel.

use std::time::Duration;

use crate::error::{HookError, Result};

pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|err| HookError::Http(format!("http client: {err}")))?;
        Ok(Self { client })
    }

    /// GET `url` and return the decoded body. Non-2xx responses are errors.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| HookError::Http(format!("request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(HookError::Http(format!("HTTP {}", response.status())));
        }

        response
            .text()
            .map_err(|err| HookError::Http(format!("read body: {err}")))
    }
}
