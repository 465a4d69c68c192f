//! j1cache - integration artifact cache
//!
//! Stores collected records as pretty-printed JSON under a cache root,
//! indexes them with absolute symlinks, and walks subtrees back out with
//! links resolved.

pub mod cache;
pub mod cli;
pub mod collect;
pub mod config;
pub mod error;
pub mod source;

pub use cache::{CachedFile, IntegrationCache};
pub use error::{CacheError, CacheResult};
