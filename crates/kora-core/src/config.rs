//! Configuration management for kora.
//!
//! Loads configuration from ${KORA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// API connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the chat backend, including the /api prefix.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Config::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Chat behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Messages requested per history page.
    pub page_limit: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            page_limit: Config::DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API connection settings.
    pub api: ApiConfig,
    /// Chat behavior settings.
    pub chat: ChatConfig,
}

impl Config {
    const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";
    const DEFAULT_TIMEOUT_SECS: u64 = 10;
    const DEFAULT_PAGE_LIMIT: u32 = 30;

    /// Loads configuration from the default config path.
    ///
    /// `KORA_API_URL` overrides the configured base URL when set.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        if let Ok(url) = std::env::var("KORA_API_URL")
            && !url.is_empty()
        {
            config.api.base_url = url;
        }
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

pub mod paths {
    //! Path resolution for kora configuration.
    //!
    //! KORA_HOME resolution order:
    //! 1. KORA_HOME environment variable (if set)
    //! 2. ~/.config/kora (default)

    use std::path::PathBuf;

    /// Returns the kora home directory.
    ///
    /// Checks KORA_HOME env var first, falls back to ~/.config/kora
    pub fn kora_home() -> PathBuf {
        if let Ok(home) = std::env::var("KORA_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("kora"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        kora_home().join("config.toml")
    }
}
