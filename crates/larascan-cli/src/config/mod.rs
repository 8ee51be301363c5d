//! Configuration management.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use larascan::{TransportConfig, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// Concurrency used when neither the flag nor the file sets one
pub const DEFAULT_THREADS: usize = 5;

/// Log filter used when neither `RUST_LOG`, `-v` nor the file sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// CLI configuration.
///
/// Every field is optional; command-line flags override what is set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of checks running at once.
    pub threads: Option<usize>,

    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,

    /// User agent sent with every request.
    pub user_agent: Option<String>,

    /// Requests per second for each check.
    pub rate_limit: Option<NonZeroU32>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Log filter directive (e.g. `info`, `larascan_scanner=debug`).
    pub log_level: Option<String>,
}

impl Config {
    /// Get the default config file path.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "larascan", "larascan")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Validate `value` and store it under `key`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "threads" => {
                let threads: usize = value.parse()?;
                anyhow::ensure!(threads > 0, "threads must be greater than 0");
                self.threads = Some(threads);
            }
            "timeout_secs" | "timeout" => {
                let secs: u64 = value.parse()?;
                anyhow::ensure!(secs > 0, "timeout_secs must be greater than 0");
                self.timeout_secs = Some(secs);
            }
            "user_agent" => {
                anyhow::ensure!(!value.trim().is_empty(), "user_agent must not be empty");
                self.user_agent = Some(value.to_string());
            }
            "rate_limit" => {
                self.rate_limit = Some(
                    value
                        .parse()
                        .context("rate_limit must be a positive integer")?,
                );
            }
            "output_format" | "output" => {
                self.output_format = Some(value.parse()?);
            }
            "log_level" => {
                EnvFilter::try_new(value)
                    .with_context(|| format!("Invalid log filter: {value}"))?;
                self.log_level = Some(value.to_string());
            }
            _ => {
                anyhow::bail!(
                    "Unknown config key: {}\n\n\
                     Available keys:\n  \
                     threads        - Checks running at once (> 0)\n  \
                     timeout_secs   - Per-request timeout in seconds (> 0)\n  \
                     user_agent     - User agent for every request\n  \
                     rate_limit     - Requests per second for each check (> 0)\n  \
                     output_format  - Default output format (pretty/json/csv/yaml)\n  \
                     log_level      - Log filter (error/warn/info/debug/trace)",
                    key
                );
            }
        }

        Ok(())
    }

    /// Transport settings with `timeout` and `rate_limit` flags layered on top.
    pub fn transport(&self, timeout: Option<u64>, rate_limit: Option<NonZeroU32>) -> TransportConfig {
        let timeout = timeout
            .or(self.timeout_secs)
            .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

        let mut config = TransportConfig::new()
            .timeout(timeout)
            .requests_per_second(rate_limit.or(self.rate_limit));
        if let Some(agent) = &self.user_agent {
            config = config.user_agent(agent.clone());
        }
        config
    }
}
