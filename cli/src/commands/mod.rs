//! # dirzip Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the dirzip CLI so that
//! `main.rs` can route to them.
//!
//! ## Commands
//!
//! - `create`: Pack a directory tree into a ZIP archive
//! - `list`: Print the entries of an existing ZIP archive
//!
//! Each command defines its own arguments structure and handler function.
//!

/// Packs a directory into a deflate-compressed ZIP archive.
pub mod create;
/// Lists the entries of an existing archive.
pub mod list;
