use std::path::PathBuf;

use tracing::warn;

use crate::config::Config;
use crate::intercept::Interceptor;

pub struct AppContext {
    pub config: Config,
    /// Set when the config file could not be loaded and defaults are in use.
    pub config_error: Option<String>,
    pub filter_file: PathBuf,
}

impl AppContext {
    /// Build the context for one invocation.
    ///
    /// A broken config never stops the hook; it falls back to defaults and
    /// the problem is surfaced through logs and `status`.
    pub fn from_cli(cli: &crate::cli::Cli) -> Self {
        let (config, config_error) = match Config::load(cli.config.as_deref()) {
            Ok(config) => (config, None),
            Err(err) => {
                warn!(error = %err, "config unusable, using defaults");
                (Config::default(), Some(err.to_string()))
            }
        };

        let filter_file = cli
            .filter_file
            .clone()
            .unwrap_or_else(|| config.filter.resolved_path());

        Self {
            config,
            config_error,
            filter_file,
        }
    }

    /// Default config with an explicit filter list.
    pub fn for_filter_file(filter_file: PathBuf) -> Self {
        Self {
            config: Config::default(),
            config_error: None,
            filter_file,
        }
    }

    pub fn interceptor(&self, cwd: Option<PathBuf>) -> Interceptor {
        Interceptor::from_config(&self.config, self.filter_file.clone(), cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::test_utils::fixtures::UnitTestFixture;
    use clap::Parser;

    #[test]
    fn explicit_filter_file_wins() {
        let fixture = UnitTestFixture::new();
        let config = fixture.create_file("config.toml", "[filter]\npath = \"/from/config.txt\"\n");
        let cli = Cli::parse_from([
            "redact-hook",
            "--config",
            config.to_str().unwrap(),
            "--filter-file",
            "/from/flag.txt",
            "status",
        ]);
        let ctx = AppContext::from_cli(&cli);
        assert_eq!(ctx.filter_file, PathBuf::from("/from/flag.txt"));
        assert!(ctx.config_error.is_none());
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        let fixture = UnitTestFixture::new();
        let config = fixture.create_file("config.toml", "[search\ntimeout_secs = ");
        let cli = Cli::parse_from(["redact-hook", "--config", config.to_str().unwrap(), "status"]);
        let ctx = AppContext::from_cli(&cli);
        assert!(ctx.config_error.is_some());
        assert_eq!(ctx.config.search.rg_path, "rg");
    }
}
