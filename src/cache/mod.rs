//! On-disk integration cache
//!
//! Artifacts live in a directory tree under a single cache root
//! (`<cwd>/.j1-integration` unless configured otherwise):
//!
//! | Primitive | Module | Effect |
//! |-----------|--------|--------|
//! | write | [`writer`] | pretty JSON file, parents created first |
//! | link | [`link`] | absolute symlink, parents created first |
//! | walk | [`walk`] | every file under a subtree, links followed |
//!
//! Nothing is held between calls. A cache without an explicit directory
//! re-derives the default root from the working directory on every
//! operation.

pub mod fs;
pub mod layout;
pub mod link;
pub mod paths;
pub mod walk;
pub mod writer;

pub use fs::{CacheFs, DirEntryInfo, EntryKind, LocalFs};
pub use link::create_link;
pub use paths::{default_cache_directory, resolve, DEFAULT_CACHE_DIR_NAME};
pub use walk::{walk_directory, CachedFile, WalkOptions, WalkSummary};
pub use writer::write_data;

use crate::error::CacheResult;
use std::path::{Path, PathBuf};

/// Handle over a cache tree
///
/// Cheap to construct and stateless apart from the optional root, so
/// callers can clone or share it freely across tasks.
#[derive(Debug, Clone, Default)]
pub struct IntegrationCache<F = LocalFs> {
    cache_directory: Option<PathBuf>,
    fs: F,
}

impl IntegrationCache<LocalFs> {
    /// Create a cache on the local filesystem
    pub fn new(cache_directory: Option<PathBuf>) -> Self {
        Self {
            cache_directory,
            fs: LocalFs,
        }
    }
}

impl<F: CacheFs> IntegrationCache<F> {
    /// Create a cache over a custom filesystem backend
    pub fn with_fs(cache_directory: Option<PathBuf>, fs: F) -> Self {
        Self {
            cache_directory,
            fs,
        }
    }

    /// The explicitly configured root, if any
    pub fn cache_directory(&self) -> Option<&Path> {
        self.cache_directory.as_deref()
    }

    /// The effective root for this call
    pub fn root(&self) -> CacheResult<PathBuf> {
        match &self.cache_directory {
            Some(dir) => Ok(dir.clone()),
            None => default_cache_directory(),
        }
    }

    /// Resolve a cache-relative path against this cache's root
    pub fn resolve(&self, relative_path: &str) -> CacheResult<PathBuf> {
        resolve(self.cache_directory.as_deref(), relative_path)
    }

    pub(crate) fn fs(&self) -> &F {
        &self.fs
    }

    /// Ensure the parent chain of `path` exists
    pub(crate) async fn ensure_parent(&self, path: &Path) -> CacheResult<()> {
        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Remove a file or link at a cache-relative path if anything is there
    ///
    /// Returns whether an entry was removed.
    pub async fn remove_if_present(&self, relative_path: &str) -> CacheResult<bool> {
        let path = self.resolve(relative_path)?;
        match self.fs.lstat(&path).await? {
            Some(EntryKind::Directory) | None => Ok(false),
            Some(_) => {
                self.fs.remove_file(&path).await?;
                Ok(true)
            }
        }
    }
}
