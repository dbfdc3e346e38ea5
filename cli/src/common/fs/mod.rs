//! # dirzip Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Filesystem helpers shared by the archive code.
//!
//! - **`walk`**: Enumerates regular files beneath a root directory and derives
//!   their `/`-separated archive entry names.
//!
//! ```rust
//! use crate::common::fs::walk;
//!
//! # fn run_example() -> anyhow::Result<()> {
//! for file in walk::regular_files(std::path::Path::new("./publish")) {
//!     println!("{}", file?.archive_name);
//! }
//! # Ok(())
//! # }
//! ```
//!

/// Recursive enumeration of the files to archive (`regular_files`, `archive_name`).
pub mod walk;
