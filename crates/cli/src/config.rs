//! Client configuration.
//!
//! Reads `~/.galleria/config.toml`, then lets the environment override it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CURRENCY: &str = "$";

pub const ENV_API_URL: &str = "GALLERIA_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "GALLERIA_TIMEOUT_SECS";
pub const ENV_CURRENCY: &str = "GALLERIA_CURRENCY";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ClientConfig {
    /// Backend base URL (e.g. "http://localhost:5000").
    pub api_url: String,

    /// Per-request timeout.
    pub timeout_secs: u64,

    /// Symbol printed in front of amounts.
    pub currency: String,

    /// Heading of printed receipts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_title: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            currency: DEFAULT_CURRENCY.to_string(),
            receipt_title: None,
        }
    }
}

impl ClientConfig {
    /// Default config file path: ~/.galleria/config.toml.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".galleria")
            .join("config.toml")
    }

    /// Load config from disk, or return default if the file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: ClientConfig =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `GALLERIA_*` overrides looked up through `lookup`.
    pub fn apply_env_with(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            self.timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))?;
        }
        if let Some(currency) = lookup(ENV_CURRENCY) {
            self.currency = currency;
        }
        Ok(())
    }

    /// File, then environment, then the `--api-url` flag.
    pub fn resolve(path: &Path, api_url_flag: Option<&str>) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_with(|key| std::env::var(key).ok())?;
        if let Some(url) = api_url_flag {
            config.api_url = url.to_string();
        }
        if config.timeout_secs == 0 {
            anyhow::bail!("timeout must be at least one second");
        }
        tracing::debug!(api_url = %config.api_url, path = %path.display(), "configuration resolved");
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
