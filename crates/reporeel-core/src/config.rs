use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{SortKey, SortOrder};

/// Main configuration structure
///
/// This gets loaded from config file, env vars, and CLI args.
/// Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Load config from default location, falling back to defaults
    pub fn load() -> crate::Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env();
        Ok(config)
    }

    /// Load from an explicit file. A missing file is not an error.
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    /// Save config to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `GITHUB_API_URL` overrides whatever the file says
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            if !url.trim().is_empty() {
                self.github.api_url = url;
            }
        }
    }

    /// Get the config file path
    /// Uses XDG on Linux/macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("reporeel");

        Ok(config_dir.join("config.toml"))
    }

    /// Where logs go while the TUI owns the terminal
    pub fn data_dir() -> crate::Result<PathBuf> {
        dirs::data_local_dir()
            .map(|dir| dir.join("reporeel"))
            .ok_or_else(|| crate::Error::ConfigError("Could not find data directory".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API URL (for GitHub Enterprise)
    #[serde(default = "default_github_url")]
    pub api_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout; there is no retry on top of it
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_github_url() -> String {
    reporeel_api::GITHUB_API_BASE.to_string()
}

fn default_user_agent() -> String {
    reporeel_api::USER_AGENT.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Empty means all languages
    #[serde(default)]
    pub default_language: String,

    #[serde(default)]
    pub default_sort: SortKey,

    #[serde(default)]
    pub order: SortOrder,

    #[serde(default = "default_min_stars")]
    pub min_stars: u32,

    /// How many cards before the end of the list the next page is requested
    #[serde(default = "default_scroll_margin")]
    pub scroll_margin: usize,
}

fn default_per_page() -> u32 {
    10
}

fn default_min_stars() -> u32 {
    crate::query::DEFAULT_MIN_STARS
}

fn default_scroll_margin() -> usize {
    3
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            default_language: String::new(),
            default_sort: SortKey::default(),
            order: SortOrder::default(),
            min_stars: default_min_stars(),
            scroll_margin: default_scroll_margin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Page freshness window in seconds
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_cache_ttl() -> u64 {
    300 // 5 minutes
}

fn default_max_entries() -> usize {
    256
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub dark_mode: bool,
}
