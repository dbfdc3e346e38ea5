//! # dirzip Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates dirzip's configuration. The
//! configuration supplies defaults for `dirzip create` so a project can pin its
//! source directory, archive path and compression level once instead of
//! passing them on every invocation.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file given with `--config` / `DIRZIP_CONFIG` (loaded alone)
//! 2. Project-specific `.dirzip.toml` in the current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/dirzip/config.toml`)
//! 4. Default values defined in the code
//!
//! Paths in a file expand `~`, and relative paths are resolved against the
//! directory containing that file, so a project file means the same thing no
//! matter where `dirzip` is run from.
//!
//! ## Examples
//!
//! ```toml
//! [archive]
//! source = "clean_publish"
//! output = "clean_deploy.zip"
//! compression_level = 6
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None)?;
//! if let Some(source) = &cfg.archive.source {
//!     println!("Default source: {}", source);
//! }
//! ```
//!
use crate::core::error::{DirzipError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
pub struct Config {
    #[serde(default)]
    pub archive: ArchiveConfig,
}

/// Defaults for `dirzip create`.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveConfig {
    /// Directory to archive (can use ~).
    pub source: Option<String>,
    /// Path of the archive to write (can use ~).
    pub output: Option<String>,
    /// Deflate level, 1 (fastest) to 9 (smallest).
    pub compression_level: Option<i64>,
}

pub const PROJECT_CONFIG_FILENAME: &str = ".dirzip.toml";
const USER_CONFIG_FILENAME: &str = "config.toml";
const MIN_COMPRESSION_LEVEL: i64 = 1;
const MAX_COMPRESSION_LEVEL: i64 = 9;

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read and it must exist. Otherwise the
/// user and project files are merged, either of which may be absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(DirzipError::Config(format!(
                    "Configuration file '{}' not found",
                    path.display()
                ))));
            }
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            let project_config = load_project_config(&current_dir)?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    validate_config(&config)?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "Dirzip", "dirzip") {
        let config_path = proj_dirs.config_dir().join(USER_CONFIG_FILENAME);
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config(start: &Path) -> Result<Option<Config>> {
    if let Some(project_config_path) = find_project_config_path(start) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.dirzip.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Searches `start` and its ancestors for `.dirzip.toml`, stopping at a
/// directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        DirzipError::Config(format!(
            "Failed to read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|e| {
        DirzipError::Config(format!(
            "Failed to parse TOML from file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    resolve_config_paths(&mut config, base_dir);
    Ok(config)
}

/// Expands `~` and anchors relative paths at `base_dir`.
fn resolve_config_paths(config: &mut Config, base_dir: &Path) {
    for slot in [&mut config.archive.source, &mut config.archive.output] {
        if let Some(raw) = slot.as_mut() {
            let expanded = PathBuf::from(shellexpand::tilde(raw.as_str()).into_owned());
            let resolved = if expanded.is_relative() {
                base_dir.join(expanded)
            } else {
                expanded
            };
            debug!("Resolved configured path '{}' to {}", raw, resolved.display());
            *raw = resolved.to_string_lossy().into_owned();
        }
    }
}

/// Per-field merge; project values win over user values.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    Config {
        archive: ArchiveConfig {
            source: project_cfg.archive.source.or(user.archive.source),
            output: project_cfg.archive.output.or(user.archive.output),
            compression_level: project_cfg
                .archive
                .compression_level
                .or(user.archive.compression_level),
        },
    }
}

fn validate_config(config: &Config) -> Result<()> {
    if let Some(level) = config.archive.compression_level {
        if !(MIN_COMPRESSION_LEVEL..=MAX_COMPRESSION_LEVEL).contains(&level) {
            return Err(anyhow!(DirzipError::Config(format!(
                "Invalid compression_level {}. Expected a value between {} and {}.",
                level, MIN_COMPRESSION_LEVEL, MAX_COMPRESSION_LEVEL
            ))));
        }
    }
    for (key, value) in [
        ("source", &config.archive.source),
        ("output", &config.archive.output),
    ] {
        if value.as_deref() == Some("") {
            return Err(anyhow!(DirzipError::Config(format!(
                "archive.{} cannot be empty.",
                key
            ))));
        }
    }
    Ok(())
}
