//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// j1cache - integration artifact cache
///
/// Writes collected records into a directory tree, indexes them with
/// symlinks, and walks the tree back out.
#[derive(Parser, Debug)]
#[command(name = "j1cache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "J1CACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Cache directory (defaults to ./.j1-integration)
    #[arg(short = 'd', long, global = true, env = "J1CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the cache directory in effect
    Root,

    /// Write a value into the cache
    Write(WriteArgs),

    /// Link one cache path to another
    Link(LinkArgs),

    /// List every file under a cache subtree
    Walk(WalkArgs),

    /// Fetch records from GitLab and store them in the cache
    Collect(CollectArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the write command
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Cache-relative path of the file
    pub path: String,

    /// Value to write (read from stdin when omitted)
    #[arg(long)]
    pub value: Option<String>,

    /// Write the input verbatim instead of pretty-printing it as JSON
    #[arg(long)]
    pub raw: bool,
}

/// Arguments for the link command
#[derive(Parser, Debug)]
pub struct LinkArgs {
    /// Cache-relative path the link points at
    pub source: String,

    /// Cache-relative path of the link itself
    pub destination: String,
}

/// Arguments for the walk command
#[derive(Parser, Debug)]
pub struct WalkArgs {
    /// Cache-relative subtree to walk
    #[arg(default_value = ".")]
    pub subtree: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Include file contents in the output
    #[arg(long)]
    pub data: bool,

    /// Concurrent file reads per directory
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the collect command
#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Resource to collect (users, groups, projects, merge_requests)
    pub resource: String,

    /// Step name under graph/ (defaults to fetch-<resource>)
    #[arg(long)]
    pub step: Option<String>,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Records stored concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., source.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}
