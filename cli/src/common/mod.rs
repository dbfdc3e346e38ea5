//! # dirzip Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Shared utility modules used by the command handlers. Keeping them under
//! `common::` separates reusable filesystem and archive logic from
//! command-specific code (`commands::`) and core infrastructure (`core::`).
//!
//! ## Architecture
//!
//! - **`archive`**: ZIP creation and inspection.
//! - **`fs`**: Directory walking and archive entry naming.
//!

/// Utilities for creating and reading ZIP archives.
pub mod archive;
/// Utilities for filesystem traversal.
pub mod fs;
