//! Error types for j1cache
//!
//! All modules use `CacheResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for j1cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// All errors that can occur in j1cache
#[derive(Error, Debug)]
pub enum CacheError {
    // Cache tree errors
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to link {destination} -> {source_path}: {source}")]
    Link {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to stat {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Handler failed for {path}: {reason}")]
    Handler { path: PathBuf, reason: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Record source errors
    #[error("API token not set. Export {0} with a personal access token")]
    MissingToken(String),

    #[error("HTTP request to {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("API returned status {status} for {url}")]
    ApiStatus { url: String, status: u16 },

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl CacheError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a handler error for the file being delivered
    pub fn handler(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Handler {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingToken(_) => Some("Create a token with read_api scope"),
            Self::ApiStatus { status: 401, .. } => Some("Check that the API token is valid"),
            Self::ApiStatus { status: 403, .. } => {
                Some("The API token lacks permission for this resource")
            }
            Self::Link { .. } => Some("Remove the existing entry at the destination first"),
            Self::ReadDir { .. } => Some("Run: j1cache root to see where the cache lives"),
            _ => None,
        }
    }
}
