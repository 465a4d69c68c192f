//! j1cache - integration artifact cache
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use j1cache::cli::{open_cache, Cli, Commands};
use j1cache::config::{Config, ConfigStore};
use j1cache::error::CacheResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> CacheResult<()> {
    let cli = Cli::parse();

    let config_store = ConfigStore::locate(cli.config.clone());
    let config = config_store.load().await?;

    init_logging(cli.verbose, &config);
    debug!("Using config file {}", config_store.path().display());

    let cache = open_cache(cli.cache_dir.as_deref(), &config_store, &config);

    match cli.command {
        Commands::Root => j1cache::cli::commands::root(&cache),
        Commands::Write(args) => j1cache::cli::commands::write(args, &cache).await,
        Commands::Link(args) => j1cache::cli::commands::link(args, &cache).await,
        Commands::Walk(args) => j1cache::cli::commands::walk(args, &cache, &config).await,
        Commands::Collect(args) => j1cache::cli::commands::collect(args, &cache, &config).await,
        Commands::Config(args) => {
            j1cache::cli::commands::config(args, &config_store, &config).await
        }
    }
}

/// Initialize logging: 0 = warn, 1 = info, 2+ = debug
fn init_logging(verbose: u8, config: &Config) {
    let filter = match verbose {
        0 => EnvFilter::new("j1cache=warn"),
        1 => EnvFilter::new("j1cache=info"),
        _ => EnvFilter::new("j1cache=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
