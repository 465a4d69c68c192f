//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigStore};
use crate::error::{CacheError, CacheResult};
use console::style;
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    store: &ConfigStore,
    config: &Config,
) -> CacheResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", store.path().display()),
        Some(ConfigAction::Init { force }) => init_config(store, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            store.update(|c| set_value(c, &key, &value)).await?;
            println!("{} Set {} = {}", style("[OK]").green(), key, value);
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> CacheResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(store: &ConfigStore, force: bool) -> CacheResult<()> {
    let path = store.path();

    if store.exists() && !force {
        println!(
            "{} Config already exists at {}",
            style("[WARN]").yellow(),
            path.display()
        );
        println!("  Use --force to overwrite");
        return Ok(());
    }

    store.save(&Config::default()).await?;
    println!(
        "{} Configuration initialized ({})",
        style("[OK]").green(),
        path.display()
    );

    Ok(())
}

fn set_value(config: &mut Config, key: &str, value: &str) -> CacheResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => return Err(CacheError::User("log_format must be text or json".to_string())),
        },

        ["cache", "directory"] => {
            config.cache.directory = (!value.is_empty()).then(|| PathBuf::from(value))
        }
        ["cache", "read_concurrency"] => config.cache.read_concurrency = parse_num(key, value)?,
        ["cache", "write_concurrency"] => config.cache.write_concurrency = parse_num(key, value)?,

        ["source", "base_url"] => config.source.base_url = value.to_string(),
        ["source", "token_env"] => config.source.token_env = value.to_string(),
        ["source", "per_page"] => config.source.per_page = parse_num(key, value)?,
        ["source", "max_pages"] => {
            config.source.max_pages = if value.is_empty() {
                None
            } else {
                Some(parse_num(key, value)?)
            }
        }
        ["source", "timeout_secs"] => config.source.timeout_secs = parse_num(key, value)?,

        _ => {
            return Err(CacheError::User(format!(
                "Unknown config key '{}'. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "cache.directory",
    "cache.read_concurrency",
    "cache.write_concurrency",
    "source.base_url",
    "source.token_env",
    "source.per_page",
    "source.max_pages",
    "source.timeout_secs",
];

fn parse_num<T: std::str::FromStr>(key: &str, value: &str) -> CacheResult<T> {
    value
        .parse()
        .map_err(|_| CacheError::User(format!("Invalid number for {}: {}", key, value)))
}
