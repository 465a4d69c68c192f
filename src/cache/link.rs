//! Link builder: secondary indexes as symlinks into the cache tree

use super::{paths, CacheFs, IntegrationCache};
use crate::error::CacheResult;
use std::path::{Path, PathBuf};
use tracing::debug;

impl<F: CacheFs> IntegrationCache<F> {
    /// Create a symlink at `destination` pointing at `source`
    ///
    /// Both paths are cache-relative. The link stores the absolute source
    /// path, anchored at the working directory when the cache root is
    /// relative, so it resolves no matter how deep the destination sits, but
    /// it breaks if the cache root is moved. The source does not need to exist
    /// yet. An existing entry at the destination is not replaced.
    pub async fn link(&self, source: &str, destination: &str) -> CacheResult<PathBuf> {
        let source_path = paths::absolute(&self.resolve(source)?)?;
        let destination_path = self.resolve(destination)?;

        self.ensure_parent(&destination_path).await?;
        self.fs().symlink(&source_path, &destination_path).await?;

        debug!(
            "Linked {} -> {}",
            destination_path.display(),
            source_path.display()
        );
        Ok(destination_path)
    }
}

/// Link two cache-relative paths on the local filesystem
///
/// Uses the default cache root when `cache_directory` is `None`.
pub async fn create_link(
    cache_directory: Option<&Path>,
    source: &str,
    destination: &str,
) -> CacheResult<PathBuf> {
    IntegrationCache::new(cache_directory.map(Path::to_path_buf))
        .link(source, destination)
        .await
}
