//! Tree walker: deliver every file under a cache subtree to a handler
//!
//! Links are followed with a stat that resolves them, so an index made of
//! symlinks yields the same contents as the tree it points into. Files in
//! one directory are read concurrently; the handler sees each file once,
//! fully read, in no particular order.

use super::{CacheFs, DirEntryInfo, EntryKind, IntegrationCache};
use crate::error::{CacheError, CacheResult};
use futures_util::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default number of sibling files read at once
pub const DEFAULT_READ_CONCURRENCY: usize = 16;

/// A file found during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    /// Absolute path of the entry as reached through the walk
    pub path: PathBuf,
    /// Raw file content, not parsed
    pub data: String,
}

/// Tuning for a walk
#[derive(Debug, Clone, Copy)]
pub struct WalkOptions {
    /// Upper bound on concurrent reads within one directory
    pub read_concurrency: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            read_concurrency: DEFAULT_READ_CONCURRENCY,
        }
    }
}

/// Counts gathered over a completed walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkSummary {
    pub files: usize,
    pub directories: usize,
}

impl<F: CacheFs> IntegrationCache<F> {
    /// Walk a cache-relative subtree, calling `handler` once per file
    pub async fn walk<H>(&self, subtree: &str, handler: H) -> CacheResult<WalkSummary>
    where
        H: FnMut(CachedFile) -> CacheResult<()>,
    {
        self.walk_with(subtree, WalkOptions::default(), handler).await
    }

    /// Walk with explicit options
    ///
    /// The first listing, stat, read or handler error aborts the walk and
    /// is returned unchanged. A missing subtree fails with
    /// [`CacheError::ReadDir`].
    pub async fn walk_with<H>(
        &self,
        subtree: &str,
        options: WalkOptions,
        mut handler: H,
    ) -> CacheResult<WalkSummary>
    where
        H: FnMut(CachedFile) -> CacheResult<()>,
    {
        let root = self.resolve(subtree)?;
        let concurrency = options.read_concurrency.max(1);
        let mut summary = WalkSummary::default();

        // Each pending directory carries the canonical paths of the
        // directories above it, which is enough to break link cycles.
        let mut pending: Vec<(PathBuf, Vec<PathBuf>)> = vec![(root, Vec::new())];

        while let Some((dir, mut ancestors)) = pending.pop() {
            let entries = self.fs().read_dir(&dir).await?;

            let real = self.fs().canonicalize(&dir).await?;
            if ancestors.contains(&real) {
                debug!("Skipping directory cycle at {}", dir.display());
                continue;
            }
            ancestors.push(real);
            summary.directories += 1;

            let mut files = Vec::new();
            for entry in entries {
                match self.classify(&entry).await? {
                    EntryKind::Directory => pending.push((entry.path, ancestors.clone())),
                    EntryKind::File => files.push(entry.path),
                    EntryKind::Symlink | EntryKind::Other => {
                        debug!("Skipping special file {}", entry.path.display());
                    }
                }
            }

            let fs = self.fs();
            let mut reads = stream::iter(files)
                .map(|path| async move {
                    let data = fs.read_to_string(&path).await?;
                    Ok::<_, CacheError>(CachedFile { path, data })
                })
                .buffer_unordered(concurrency);

            while let Some(file) = reads.next().await {
                handler(file?)?;
                summary.files += 1;
            }
        }

        debug!(
            "Walked {} files in {} directories",
            summary.files, summary.directories
        );
        Ok(summary)
    }

    /// Resolve what an entry is once links are followed
    async fn classify(&self, entry: &DirEntryInfo) -> CacheResult<EntryKind> {
        match entry.kind {
            EntryKind::Symlink => self.fs().stat(&entry.path).await,
            kind => Ok(kind),
        }
    }
}

/// Walk a subtree of a cache on the local filesystem
///
/// Uses the default cache root when `cache_directory` is `None`.
pub async fn walk_directory<H>(
    cache_directory: Option<&Path>,
    subtree: &str,
    handler: H,
) -> CacheResult<WalkSummary>
where
    H: FnMut(CachedFile) -> CacheResult<()>,
{
    IntegrationCache::new(cache_directory.map(Path::to_path_buf))
        .walk(subtree, handler)
        .await
}
