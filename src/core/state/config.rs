use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{FetchError, FetchResult};
use crate::core::registry::MODRINTH_API;
use crate::core::retry::RetryPolicy;
use crate::core::version::TargetVersion;

/// When to colour console output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ColorChoice {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Resolve to a yes/no once, at startup.
    pub fn enabled(self, stdout_is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => stdout_is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub manifest: PathBuf,
    pub target: TargetVersion,
    pub output_root: PathBuf,
    pub api_base: String,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub color: bool,
    pub dry_run: bool,
}

impl FetchConfig {
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// Settings with defaults for everything but the two required inputs.
    pub fn new(manifest: impl Into<PathBuf>, target: &str) -> FetchResult<Self> {
        let target = target.trim();
        if target.is_empty() {
            return Err(FetchError::Config("target version is empty".into()));
        }
        Ok(Self {
            manifest: manifest.into(),
            target: TargetVersion::new(target),
            output_root: PathBuf::from("."),
            api_base: MODRINTH_API.to_string(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            color: false,
            dry_run: false,
        })
    }

    pub fn with_attempts(mut self, attempts: u32) -> FetchResult<Self> {
        if attempts == 0 {
            return Err(FetchError::Config("--retries must be at least 1".into()));
        }
        self.retry = RetryPolicy::new(attempts);
        Ok(self)
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> FetchResult<Self> {
        if secs == 0 {
            return Err(FetchError::Config("--timeout must be at least 1 second".into()));
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }
}
