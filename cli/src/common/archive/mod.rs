//! # dirzip Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module is the organizational unit for archive handling in dirzip.
//! The single supported container is ZIP with deflate-compressed entries.
//!
//! ## Architecture
//!
//! - **`zip`**: Creates a ZIP archive from a directory tree
//!   (`create_zip_from_dir`) and reads the entry table of an existing one
//!   (`read_zip_entries`).
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::zip::{create_zip_from_dir, ArchiveOptions};
//! use std::path::Path;
//!
//! # fn run() -> anyhow::Result<()> {
//! let summary = create_zip_from_dir(
//!     Path::new("./clean_publish"),
//!     Path::new("./clean_deploy.zip"),
//!     &ArchiveOptions::default(),
//! )?;
//! # Ok(())
//! # }
//! ```
//!

pub mod zip;
