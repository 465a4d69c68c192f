//! Command-line interface

pub mod args;
pub mod commands;

pub use args::{Cli, Commands};

use crate::cache::{paths, IntegrationCache};
use crate::config::{Config, ConfigStore};
use std::path::Path;
use tracing::warn;

/// Build the cache handle for a command
///
/// See [`ConfigStore::cache_directory`] for how the root is chosen.
pub fn open_cache(
    cli_dir: Option<&Path>,
    store: &ConfigStore,
    config: &Config,
) -> IntegrationCache {
    IntegrationCache::new(store.cache_directory(cli_dir, config))
}

/// Warn about paths that climb out of the cache root
///
/// Such paths are still honored.
pub fn check_relative_path(relative_path: &str) {
    if paths::escapes_root(relative_path) {
        warn!("Path {} points outside the cache directory", relative_path);
    }
}
