//! Walk command - list every file under a cache subtree

use crate::cache::{CachedFile, IntegrationCache, WalkOptions};
use crate::cli::args::{OutputFormat, WalkArgs};
use crate::config::Config;
use crate::error::CacheResult;
use console::style;
use std::path::Path;

/// Execute the walk command
pub async fn execute(
    args: WalkArgs,
    cache: &IntegrationCache,
    config: &Config,
) -> CacheResult<()> {
    let options = WalkOptions {
        read_concurrency: args
            .concurrency
            .unwrap_or(config.cache.read_concurrency),
    };

    let mut files = Vec::new();
    let summary = cache
        .walk_with(&args.subtree, options, |file| {
            files.push(file);
            Ok(())
        })
        .await?;

    // Walk order is unspecified; sort for stable output
    files.sort_by(|a, b| a.path.cmp(&b.path));
    let root = cache.root()?;

    match args.format {
        OutputFormat::Table => print_table(&files, &root, args.data),
        OutputFormat::Json => print_json(&files, &root, args.data)?,
        OutputFormat::Plain => print_plain(&files, &root),
    }

    if matches!(args.format, OutputFormat::Table) {
        println!();
        println!(
            "{} file(s) in {} director(ies)",
            summary.files, summary.directories
        );
    }

    Ok(())
}

fn display_path(file: &CachedFile, root: &Path) -> String {
    let relative = file.path.strip_prefix(root).unwrap_or(&file.path);
    relative.display().to_string()
}

fn print_table(files: &[CachedFile], root: &Path, with_data: bool) {
    println!("{:<60} {:>10}", style("PATH").bold(), style("BYTES").bold());
    println!("{}", "-".repeat(71));

    for file in files {
        println!("{:<60} {:>10}", display_path(file, root), file.data.len());
        if with_data {
            println!("{}", style(&file.data).dim());
        }
    }
}

fn print_json(files: &[CachedFile], root: &Path, with_data: bool) -> CacheResult<()> {
    #[derive(serde::Serialize)]
    struct FileJson<'a> {
        path: String,
        bytes: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<&'a str>,
    }

    let json_files: Vec<FileJson<'_>> = files
        .iter()
        .map(|f| FileJson {
            path: display_path(f, root),
            bytes: f.data.len(),
            data: with_data.then_some(f.data.as_str()),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&json_files)?);
    Ok(())
}

fn print_plain(files: &[CachedFile], root: &Path) {
    for file in files {
        println!("{}", display_path(file, root));
    }
}
