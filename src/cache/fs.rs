//! Filesystem abstraction for the cache tree
//!
//! The writer, link builder and walker only touch the disk through
//! [`CacheFs`], which keeps them testable without mocking `tokio::fs`.

use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Kind of a directory entry, as seen during traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    /// Sockets, fifos, devices
    Other,
}

/// A single entry produced while listing a directory
#[derive(Debug, Clone)]
pub struct DirEntryInfo {
    pub path: PathBuf,
    /// Kind of the entry itself, without following links
    pub kind: EntryKind,
}

/// Filesystem operations used by the cache
#[async_trait]
pub trait CacheFs: Send + Sync {
    /// Create a directory and all of its missing ancestors
    async fn create_dir_all(&self, path: &Path) -> CacheResult<()>;

    /// Create or truncate a file with the given contents
    async fn write(&self, path: &Path, contents: &[u8]) -> CacheResult<()>;

    /// Create a symbolic link at `destination` pointing at `target`
    async fn symlink(&self, target: &Path, destination: &Path) -> CacheResult<()>;

    /// List the entries of a directory
    async fn read_dir(&self, path: &Path) -> CacheResult<Vec<DirEntryInfo>>;

    /// Kind of the object at `path`, following symlinks
    async fn stat(&self, path: &Path) -> CacheResult<EntryKind>;

    /// Kind of the object at `path` without following symlinks, `None` if absent
    async fn lstat(&self, path: &Path) -> CacheResult<Option<EntryKind>>;

    /// Canonical path with every link resolved
    async fn canonicalize(&self, path: &Path) -> CacheResult<PathBuf>;

    /// Read a whole file as UTF-8 text
    async fn read_to_string(&self, path: &Path) -> CacheResult<String>;

    /// Remove a file or symlink
    async fn remove_file(&self, path: &Path) -> CacheResult<()>;
}

/// [`CacheFs`] backed by the local disk through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

fn kind_of(file_type: std::fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}

#[async_trait]
impl CacheFs for LocalFs {
    async fn create_dir_all(&self, path: &Path) -> CacheResult<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| CacheError::DirectoryCreate {
                path: path.to_path_buf(),
                source: e,
            })
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> CacheResult<()> {
        fs::write(path, contents)
            .await
            .map_err(|e| CacheError::Write {
                path: path.to_path_buf(),
                source: e,
            })
    }

    async fn symlink(&self, target: &Path, destination: &Path) -> CacheResult<()> {
        #[cfg(unix)]
        let result = fs::symlink(target, destination).await;
        #[cfg(windows)]
        let result = fs::symlink_file(target, destination).await;

        result.map_err(|e| CacheError::Link {
            source_path: target.to_path_buf(),
            destination: destination.to_path_buf(),
            source: e,
        })
    }

    async fn read_dir(&self, path: &Path) -> CacheResult<Vec<DirEntryInfo>> {
        let list_err = |e| CacheError::ReadDir {
            path: path.to_path_buf(),
            source: e,
        };

        let mut entries = fs::read_dir(path).await.map_err(list_err)?;
        let mut listed = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(list_err)? {
            let file_type = entry.file_type().await.map_err(|e| CacheError::Stat {
                path: entry.path(),
                source: e,
            })?;
            listed.push(DirEntryInfo {
                path: entry.path(),
                kind: kind_of(file_type),
            });
        }

        Ok(listed)
    }

    async fn stat(&self, path: &Path) -> CacheResult<EntryKind> {
        let metadata = fs::metadata(path).await.map_err(|e| CacheError::Stat {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(kind_of(metadata.file_type()))
    }

    async fn lstat(&self, path: &Path) -> CacheResult<Option<EntryKind>> {
        match fs::symlink_metadata(path).await {
            Ok(metadata) => Ok(Some(kind_of(metadata.file_type()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CacheError::Stat {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    async fn canonicalize(&self, path: &Path) -> CacheResult<PathBuf> {
        fs::canonicalize(path).await.map_err(|e| CacheError::Stat {
            path: path.to_path_buf(),
            source: e,
        })
    }

    async fn read_to_string(&self, path: &Path) -> CacheResult<String> {
        fs::read_to_string(path).await.map_err(|e| CacheError::Read {
            path: path.to_path_buf(),
            source: e,
        })
    }

    async fn remove_file(&self, path: &Path) -> CacheResult<()> {
        fs::remove_file(path)
            .await
            .map_err(|e| CacheError::io(format!("removing {}", path.display()), e))
    }
}

/// Test double that records every mutating call before delegating to disk
#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Op {
        CreateDirAll(PathBuf),
        Write(PathBuf),
        Symlink { target: PathBuf, destination: PathBuf },
    }

    #[derive(Default)]
    pub struct RecordingFs {
        inner: LocalFs,
        ops: Mutex<Vec<Op>>,
    }

    impl RecordingFs {
        pub fn ops(&self) -> Vec<Op> {
            self.ops.lock().unwrap().clone()
        }

        fn record(&self, op: Op) {
            self.ops.lock().unwrap().push(op);
        }
    }

    #[async_trait]
    impl CacheFs for RecordingFs {
        async fn create_dir_all(&self, path: &Path) -> CacheResult<()> {
            self.record(Op::CreateDirAll(path.to_path_buf()));
            self.inner.create_dir_all(path).await
        }

        async fn write(&self, path: &Path, contents: &[u8]) -> CacheResult<()> {
            // The write must observe the directory already in place
            assert!(
                path.parent().is_some_and(Path::is_dir),
                "parent of {} missing at write time",
                path.display()
            );
            self.record(Op::Write(path.to_path_buf()));
            self.inner.write(path, contents).await
        }

        async fn symlink(&self, target: &Path, destination: &Path) -> CacheResult<()> {
            assert!(
                destination.parent().is_some_and(Path::is_dir),
                "parent of {} missing at link time",
                destination.display()
            );
            self.record(Op::Symlink {
                target: target.to_path_buf(),
                destination: destination.to_path_buf(),
            });
            self.inner.symlink(target, destination).await
        }

        async fn read_dir(&self, path: &Path) -> CacheResult<Vec<DirEntryInfo>> {
            self.inner.read_dir(path).await
        }

        async fn stat(&self, path: &Path) -> CacheResult<EntryKind> {
            self.inner.stat(path).await
        }

        async fn lstat(&self, path: &Path) -> CacheResult<Option<EntryKind>> {
            self.inner.lstat(path).await
        }

        async fn canonicalize(&self, path: &Path) -> CacheResult<PathBuf> {
            self.inner.canonicalize(path).await
        }

        async fn read_to_string(&self, path: &Path) -> CacheResult<String> {
            self.inner.read_to_string(path).await
        }

        async fn remove_file(&self, path: &Path) -> CacheResult<()> {
            self.inner.remove_file(path).await
        }
    }
}
