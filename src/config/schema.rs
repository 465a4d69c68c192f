//! Configuration schema for j1cache
//!
//! Configuration is stored at `~/.config/j1cache/config.toml`

use crate::cache::walk::DEFAULT_READ_CONCURRENCY;
use crate::collect::DEFAULT_WRITE_CONCURRENCY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Cache tree settings
    pub cache: CacheConfig,

    /// Record source settings
    pub source: SourceConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Cache tree settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache root; `<cwd>/.j1-integration` when unset
    pub directory: Option<PathBuf>,

    /// Concurrent file reads per directory during a walk
    pub read_concurrency: usize,

    /// Concurrent record writes during collection
    pub write_concurrency: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            directory: None,
            read_concurrency: DEFAULT_READ_CONCURRENCY,
            write_concurrency: DEFAULT_WRITE_CONCURRENCY,
        }
    }
}

/// GitLab API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Instance base URL
    pub base_url: String,

    /// Environment variable holding the API token
    pub token_env: String,

    /// Records requested per page (max 100)
    pub per_page: u32,

    /// Stop after this many pages (unset = all)
    pub max_pages: Option<u32>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gitlab.com".to_string(),
            token_env: "GITLAB_TOKEN".to_string(),
            per_page: 100,
            max_pages: None,
            timeout_secs: 30,
        }
    }
}
