//! # dirzip List Command
//!
//! File: cli/src/commands/list.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `dirzip list <ARCHIVE>`, which prints the entries of an existing
//! ZIP archive: uncompressed size, compressed size, method and name, one per line,
//! followed by an entry count. Useful for checking what `dirzip create`
//! produced without extracting anything.
//!
use crate::common::archive::zip::{read_zip_entries, EntryInfo};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// ZIP archive to inspect.
    pub archive: PathBuf,
}

pub fn handle_list(args: ListArgs) -> Result<()> {
    info!("Listing entries of {}", args.archive.display());
    let entries = read_zip_entries(&args.archive)?;
    print!("{}", render_listing(&entries));
    Ok(())
}

fn render_listing(entries: &[EntryInfo]) -> String {
    let mut out = format!(
        "{:>12}  {:>12}  {:<8}  {}\n",
        "Size", "Compressed", "Method", "Name"
    );
    for entry in entries {
        out.push_str(&format!(
            "{:>12}  {:>12}  {:<8}  {}\n",
            entry.size, entry.compressed_size, entry.method, entry.name
        ));
    }
    let total: u64 = entries.iter().map(|e| e.size).sum();
    out.push_str(&format!("{} entries, {} bytes\n", entries.len(), total));
    out
}
