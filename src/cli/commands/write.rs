//! Write command - store a value in the cache

use crate::cache::IntegrationCache;
use crate::cli::args::WriteArgs;
use crate::cli::check_relative_path;
use crate::error::{CacheError, CacheResult};
use console::style;
use tokio::io::AsyncReadExt;

/// Execute the write command
pub async fn execute(args: WriteArgs, cache: &IntegrationCache) -> CacheResult<()> {
    check_relative_path(&args.path);

    let input = match args.value {
        Some(value) => value,
        None => read_stdin().await?,
    };

    let path = if args.raw {
        cache.write_text(&args.path, &input).await?
    } else {
        let value = parse_json(&input)?;
        cache.write(&args.path, &value).await?
    };

    println!("{} {}", style("Wrote").green(), path.display());
    Ok(())
}

async fn read_stdin() -> CacheResult<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .map_err(|e| CacheError::io("reading value from stdin", e))?;
    Ok(input)
}

fn parse_json(input: &str) -> CacheResult<serde_json::Value> {
    serde_json::from_str(input).map_err(|e| {
        CacheError::User(format!(
            "Value is not valid JSON ({}). Pass --raw to store it verbatim",
            e
        ))
    })
}
