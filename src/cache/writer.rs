//! Durable writer: serialize a value into the cache tree

use super::{CacheFs, IntegrationCache};
use crate::error::CacheResult;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

impl<F: CacheFs> IntegrationCache<F> {
    /// Write `value` as pretty-printed JSON at a cache-relative path
    ///
    /// Missing ancestor directories are created before the file is written.
    /// An existing file is replaced.
    pub async fn write<T>(&self, relative_path: &str, value: &T) -> CacheResult<PathBuf>
    where
        T: Serialize + ?Sized,
    {
        let content = serde_json::to_string_pretty(value)?;
        self.write_text(relative_path, &content).await
    }

    /// Write already-formatted text verbatim at a cache-relative path
    pub async fn write_text(&self, relative_path: &str, content: &str) -> CacheResult<PathBuf> {
        let path = self.resolve(relative_path)?;

        self.ensure_parent(&path).await?;
        self.fs().write(&path, content.as_bytes()).await?;

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}

/// Write `value` into the cache on the local filesystem
///
/// Uses the default cache root when `cache_directory` is `None`.
pub async fn write_data<T>(
    cache_directory: Option<&Path>,
    relative_path: &str,
    value: &T,
) -> CacheResult<PathBuf>
where
    T: Serialize + ?Sized,
{
    IntegrationCache::new(cache_directory.map(Path::to_path_buf))
        .write(relative_path, value)
        .await
}
