//! # dirzip Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout dirzip. Failures are
//! classified into a small taxonomy so that callers (and tests) can tell a
//! missing source directory apart from a failed read or write.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `DirzipError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover:
//! - A source directory that does not exist or is not a directory
//! - Filesystem read/write failures, tagged with the path involved
//! - ZIP format failures that are not plain I/O
//! - Invalid configuration
//!
//! ## Examples
//!
//! ```rust
//! // Raise a typed error through anyhow
//! if !source.is_dir() {
//!     anyhow::bail!(DirzipError::SourceNotFound { path: source.to_path_buf() });
//! }
//!
//! // Classify a failure
//! match result {
//!     Err(e) if matches!(e.downcast_ref::<DirzipError>(), Some(DirzipError::SourceNotFound { .. })) => {
//!         println!("Nothing to archive.");
//!     }
//!     other => other?,
//! }
//! ```
//!
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error type for the dirzip application.
#[derive(Error, Debug)]
pub enum DirzipError {
    #[error("Source directory '{}' not found or not a directory", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error on '{}': {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DirzipError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        DirzipError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wraps a `zip` error. Errors that are really I/O failures are reported
    /// as `Io` so read/write problems share one variant.
    pub fn zip(path: &Path, source: zip::result::ZipError) -> Self {
        match source {
            zip::result::ZipError::Io(io_err) => Self::io(path, io_err),
            other => DirzipError::Archive {
                path: path.to_path_buf(),
                source: other,
            },
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
