//! Root command - print the cache directory in effect

use crate::cache::IntegrationCache;
use crate::error::CacheResult;

/// Execute the root command
pub fn execute(cache: &IntegrationCache) -> CacheResult<()> {
    println!("{}", cache.root()?.display());
    Ok(())
}
