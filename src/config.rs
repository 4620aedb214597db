//! Configuration Management
//!
//! Handles persistent configuration storage for stockroom.

use crate::notification::DetailLevel;
use crate::resource::{PageBase, DEFAULT_PAGE_SIZE};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// API origin used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Seconds a cached query stays fresh
pub const DEFAULT_STALE_TIME_SECS: u64 = 30;

/// Toast settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub detail_level: DetailLevel,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_max_history() -> usize {
    50
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            detail_level: DetailLevel::default(),
            max_history: default_max_history(),
        }
    }
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// API origin, e.g. `http://localhost:8080/`
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// How the server numbers pages
    #[serde(default)]
    pub page_base: PageBase,
    #[serde(default = "default_stale_time")]
    pub stale_time_secs: u64,
    /// No timeout beyond the transport default when unset
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub notifications: NotificationSettings,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_stale_time() -> u64 {
    DEFAULT_STALE_TIME_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            page_size: DEFAULT_PAGE_SIZE,
            page_base: PageBase::default(),
            stale_time_secs: DEFAULT_STALE_TIME_SECS,
            request_timeout_secs: None,
            notifications: NotificationSettings::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stockroom").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Parse a config document, falling back to defaults when it is invalid
    pub fn parse(content: &str) -> Self {
        match serde_json::from_str::<Config>(content) {
            Ok(mut config) => {
                if config.page_size == 0 {
                    config.page_size = DEFAULT_PAGE_SIZE;
                }
                config
            }
            Err(e) => {
                tracing::warn!("Invalid config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };

        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Get effective base URL (config > default)
    pub fn effective_base_url(&self) -> String {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
            .to_string()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }

    /// Set base URL and save
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        url::Url::parse(base_url)?;
        self.base_url = Some(base_url.to_string());
        self.save()
    }

    /// Set page size and save
    pub fn set_page_size(&mut self, page_size: u32) -> Result<()> {
        anyhow::ensure!(page_size > 0, "page size must be positive");
        self.page_size = page_size;
        self.save()
    }
}
