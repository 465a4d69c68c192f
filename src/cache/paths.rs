//! Cache root derivation and cache-relative path resolution

use crate::error::{CacheError, CacheResult};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Name of the cache directory created under the working directory
pub const DEFAULT_CACHE_DIR_NAME: &str = ".j1-integration";

/// Get the default cache directory: `<cwd>/.j1-integration`
///
/// Re-reads the process working directory on every call so that a
/// `chdir` between two calls is reflected in the result.
pub fn default_cache_directory() -> CacheResult<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| CacheError::io("getting current directory", e))?;
    Ok(concat(&cwd, DEFAULT_CACHE_DIR_NAME))
}

/// Resolve a cache-relative path to an absolute path
///
/// Plain concatenation with a single `/`. Neither `.` nor `..` segments are
/// normalized, and an absolute `relative_path` does not replace the root.
pub fn resolve(cache_directory: Option<&Path>, relative_path: &str) -> CacheResult<PathBuf> {
    let root = match cache_directory {
        Some(dir) => dir.to_path_buf(),
        None => default_cache_directory()?,
    };
    Ok(concat(&root, relative_path))
}

/// Whether a cache-relative path climbs out of the cache root
///
/// Purely lexical. Resolution never rejects such paths; callers decide.
pub fn escapes_root(relative_path: &str) -> bool {
    let mut depth: i64 = 0;
    for component in Path::new(relative_path).components() {
        match component {
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return true;
                }
            }
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => {}
        }
    }
    false
}

/// Anchor a path at the working directory if it is relative
///
/// `..` segments are kept as written.
pub fn absolute(path: &Path) -> CacheResult<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| CacheError::io(format!("making {} absolute", path.display()), e))
}

fn concat(root: &Path, relative_path: &str) -> PathBuf {
    let mut joined = OsString::from(root.as_os_str());
    joined.push("/");
    joined.push(relative_path);
    PathBuf::from(joined)
}
