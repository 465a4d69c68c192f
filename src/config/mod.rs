//! Configuration file handling for j1cache
//!
//! One TOML file, `<config dir>/j1cache/config.toml` unless `--config` or
//! `J1CACHE_CONFIG` names another. A missing file means defaults.

pub mod schema;

pub use schema::Config;

use crate::error::{CacheError, CacheResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Location of the config file, with load and save around it
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Use `explicit` when given, else the per-user default location
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        let path = explicit.unwrap_or_else(Self::default_path);
        Self { path }
    }

    /// `<config dir>/j1cache/config.toml`, or `./j1cache/config.toml` when
    /// the platform has no config directory
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("j1cache")
            .join("config.toml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read the file; a missing file yields `Config::default()`
    pub async fn load(&self) -> CacheResult<Config> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(CacheError::io(
                    format!("reading config from {}", self.path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&content).map_err(|e| CacheError::ConfigInvalid {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write `config`, creating the containing directory if needed
    pub async fn save(&self, config: &Config) -> CacheResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| CacheError::io(format!("writing config to {}", self.path.display()), e))?;

        info!("Configuration saved to {}", self.path.display());
        Ok(())
    }

    /// Load, apply `edit`, and save back only if the edit succeeds
    pub async fn update<E>(&self, edit: E) -> CacheResult<Config>
    where
        E: FnOnce(&mut Config) -> CacheResult<()>,
    {
        let mut config = self.load().await?;
        edit(&mut config)?;
        self.save(&config).await?;
        Ok(config)
    }

    /// Cache root for this run
    ///
    /// A command-line directory wins and is taken as given. Otherwise
    /// `cache.directory` is used, with a relative value anchored at the
    /// directory holding the config file. `None` means the default
    /// `<cwd>/.j1-integration` root.
    pub fn cache_directory(&self, cli_dir: Option<&Path>, config: &Config) -> Option<PathBuf> {
        if let Some(dir) = cli_dir {
            return Some(dir.to_path_buf());
        }

        let configured = config.cache.directory.as_deref()?;
        if configured.is_absolute() {
            return Some(configured.to_path_buf());
        }
        let base = self.path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(configured))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::locate(Some(temp.path().join("absent.toml")));

        let config = store.load().await.unwrap();

        assert!(!store.exists());
        assert_eq!(config.source.base_url, "https://gitlab.com");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::locate(Some(temp.path().join("nested/config.toml")));

        let mut config = Config::default();
        config.cache.directory = Some(PathBuf::from("/srv/j1"));
        store.save(&config).await.unwrap();

        assert!(store.exists());
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.cache.directory, Some(PathBuf::from("/srv/j1")));
    }

    #[tokio::test]
    async fn invalid_file_is_reported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[cache\nbroken").unwrap();

        let err = ConfigStore::locate(Some(path)).load().await.unwrap_err();

        assert!(matches!(err, CacheError::ConfigInvalid { .. }));
    }

    #[tokio::test]
    async fn failed_update_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let store = ConfigStore::locate(Some(temp.path().join("config.toml")));

        let err = store
            .update(|_| Err(CacheError::User("nope".to_string())))
            .await
            .unwrap_err();
        assert!(matches!(err, CacheError::User(_)));
        assert!(!store.exists());

        let updated = store
            .update(|c| {
                c.source.per_page = 50;
                Ok(())
            })
            .await
            .unwrap();
        assert_eq!(updated.source.per_page, 50);
        assert_eq!(store.load().await.unwrap().source.per_page, 50);
    }

    #[test]
    fn command_line_directory_wins() {
        let store = ConfigStore::locate(Some(PathBuf::from("/etc/j1cache/config.toml")));
        let mut config = Config::default();
        config.cache.directory = Some(PathBuf::from("/srv/j1"));

        let dir = store.cache_directory(Some(Path::new("rel/cache")), &config);

        assert_eq!(dir, Some(PathBuf::from("rel/cache")));
    }

    #[test]
    fn configured_directory_is_anchored_at_config_file() {
        let store = ConfigStore::locate(Some(PathBuf::from("/etc/j1cache/config.toml")));
        let mut config = Config::default();

        assert_eq!(store.cache_directory(None, &config), None);

        config.cache.directory = Some(PathBuf::from("cache"));
        assert_eq!(
            store.cache_directory(None, &config),
            Some(PathBuf::from("/etc/j1cache/cache"))
        );

        config.cache.directory = Some(PathBuf::from("/srv/j1"));
        assert_eq!(
            store.cache_directory(None, &config),
            Some(PathBuf::from("/srv/j1"))
        );
    }
}
