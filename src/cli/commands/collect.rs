//! Collect command - fetch GitLab records into the cache

use crate::cache::IntegrationCache;
use crate::cli::args::CollectArgs;
use crate::collect::{collect, CollectOptions};
use crate::config::Config;
use crate::error::CacheResult;
use crate::source::{GitlabClient, Resource};
use console::style;

/// Execute the collect command
pub async fn execute(
    args: CollectArgs,
    cache: &IntegrationCache,
    config: &Config,
) -> CacheResult<()> {
    let resource: Resource = args.resource.parse()?;
    let options = options_from(&args, resource, config);
    let client = GitlabClient::from_config(&config.source)?;

    let report = collect(cache, &client, resource, &options).await?;

    println!(
        "{} {} {} record(s) into graph/{}",
        style("Collected").green(),
        report.records,
        report.resource,
        report.step
    );
    if report.replaced > 0 {
        println!("  {} stale index link(s) replaced", report.replaced);
    }

    Ok(())
}

fn options_from(args: &CollectArgs, resource: Resource, config: &Config) -> CollectOptions {
    let defaults = CollectOptions::for_resource(resource);
    CollectOptions {
        step: args.step.clone().unwrap_or(defaults.step),
        max_pages: args.max_pages.or(config.source.max_pages),
        concurrency: args.concurrency.unwrap_or(config.cache.write_concurrency),
    }
}
