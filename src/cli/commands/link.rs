//! Link command - index one cache path under another

use crate::cache::IntegrationCache;
use crate::cli::args::LinkArgs;
use crate::cli::check_relative_path;
use crate::error::CacheResult;
use console::style;

/// Execute the link command
pub async fn execute(args: LinkArgs, cache: &IntegrationCache) -> CacheResult<()> {
    check_relative_path(&args.source);
    check_relative_path(&args.destination);

    let destination = cache.link(&args.source, &args.destination).await?;

    println!(
        "{} {} -> {}",
        style("Linked").green(),
        destination.display(),
        args.source
    );
    Ok(())
}
