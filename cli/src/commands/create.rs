//! # dirzip Create Command
//!
//! File: cli/src/commands/create.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `dirzip create`, which packs a directory tree into a
//! deflate-compressed ZIP archive and prints a completion line.
//!
//! ## Architecture
//!
//! 1. Resolve the source directory, output path and compression level from
//!    command-line arguments, then the loaded configuration, then defaults.
//! 2. Hand off to `common::archive::zip::create_zip_from_dir`.
//! 3. Print `Archive created successfully: <output> (<n> files, <bytes> bytes)` on stdout.
//!
//! ## Examples
//!
//! ```bash
//! # Archive ./clean_publish into ./clean_publish.zip
//! dirzip create clean_publish
//!
//! # Explicit destination and maximum compression
//! dirzip create clean_publish -o clean_deploy.zip --level 9
//! ```
//!
use crate::common::archive::zip::{create_zip_from_dir, ArchiveOptions};
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const DEFAULT_SOURCE: &str = ".";
const FALLBACK_ARCHIVE_NAME: &str = "archive.zip";

/// # Create Command Arguments (`CreateArgs`)
///
/// Any argument left out falls back to the `[archive]` section of the
/// configuration, then to the built-in default.
#[derive(Parser, Debug, Default)]
pub struct CreateArgs {
    /// Directory whose files are archived. Defaults to the current directory.
    pub source: Option<PathBuf>,

    /// Archive file to write. Replaced if it already exists.
    /// Defaults to `<source directory name>.zip` in the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Deflate compression level, 1 (fastest) to 9 (smallest).
    #[arg(short, long, value_parser = clap::value_parser!(i64).range(1..=9))]
    pub level: Option<i64>,
}

/// Fully resolved inputs of one `create` run.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CreatePlan {
    source: PathBuf,
    output: PathBuf,
    options: ArchiveOptions,
}

/// # Handle Create Command (`handle_create`)
///
/// Resolves the run's settings, writes the archive and reports completion.
///
/// ## Errors
///
/// Propagates `SourceNotFound` and `Io` failures from the archiver unchanged,
/// so `main` reports them and exits non-zero without a success line.
pub fn handle_create(args: CreateArgs, config: &Config) -> Result<()> {
    info!("Handling create command with args: {:?}", args);

    let plan = resolve_plan(args, config);
    debug!("Effective create plan: {:?}", plan);

    let summary = create_zip_from_dir(&plan.source, &plan.output, &plan.options)?;

    println!(
        "Archive created successfully: {} ({} files, {} bytes)",
        summary.output.display(),
        summary.entries,
        summary.bytes_read
    );
    Ok(())
}

/// Merges arguments over configuration over defaults.
fn resolve_plan(args: CreateArgs, config: &Config) -> CreatePlan {
    let source = args
        .source
        .or_else(|| config.archive.source.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));

    let output = args
        .output
        .or_else(|| config.archive.output.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| default_output_for(&source));

    CreatePlan {
        source,
        output,
        options: ArchiveOptions {
            compression_level: args.level.or(config.archive.compression_level),
        },
    }
}

/// `<name>.zip` in the current directory, named after the source directory.
fn default_output_for(source: &Path) -> PathBuf {
    // Canonicalize so `.` and `..` map to a real directory name.
    let resolved = std::fs::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
    match resolved.file_name() {
        Some(name) => {
            let mut file_name = name.to_os_string();
            file_name.push(".zip");
            PathBuf::from(file_name)
        }
        None => PathBuf::from(FALLBACK_ARCHIVE_NAME),
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ArchiveConfig;
    use tempfile::tempdir;

    fn config_with(source: Option<&str>, output: Option<&str>, level: Option<i64>) -> Config {
        Config {
            archive: ArchiveConfig {
                source: source.map(String::from),
                output: output.map(String::from),
                compression_level: level,
            },
        }
    }

    #[test]
    fn test_resolve_plan_arguments_win() {
        let args = CreateArgs {
            source: Some(PathBuf::from("/cli/src")),
            output: Some(PathBuf::from("/cli/out.zip")),
            level: Some(1),
        };
        let config = config_with(Some("/cfg/src"), Some("/cfg/out.zip"), Some(8));

        let plan = resolve_plan(args, &config);
        assert_eq!(plan.source, PathBuf::from("/cli/src"));
        assert_eq!(plan.output, PathBuf::from("/cli/out.zip"));
        assert_eq!(plan.options.compression_level, Some(1));
    }

    #[test]
    fn test_resolve_plan_falls_back_to_config() {
        let config = config_with(Some("/cfg/src"), Some("/cfg/out.zip"), Some(8));

        let plan = resolve_plan(CreateArgs::default(), &config);
        assert_eq!(plan.source, PathBuf::from("/cfg/src"));
        assert_eq!(plan.output, PathBuf::from("/cfg/out.zip"));
        assert_eq!(plan.options.compression_level, Some(8));
    }

    #[test]
    fn test_resolve_plan_defaults() {
        let plan = resolve_plan(CreateArgs::default(), &Config::default());
        assert_eq!(plan.source, PathBuf::from(DEFAULT_SOURCE));
        assert_eq!(plan.options.compression_level, None);
        assert!(plan.output.to_string_lossy().ends_with(".zip"));
    }

    #[test]
    fn test_default_output_named_after_source() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("clean_publish");
        std::fs::create_dir(&source).unwrap();

        assert_eq!(default_output_for(&source), PathBuf::from("clean_publish.zip"));
        assert_eq!(
            default_output_for(&source.join("..").join("clean_publish")),
            PathBuf::from("clean_publish.zip")
        );
    }

    #[test]
    fn test_default_output_for_root() {
        assert_eq!(
            default_output_for(Path::new("/")),
            PathBuf::from(FALLBACK_ARCHIVE_NAME)
        );
    }
}
