//! # dirzip CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test file
//! declares `mod common;` and uses these to run the compiled `dirzip` binary
//! and inspect the archives it writes.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

/// # Get dirzip Command (`dirzip_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `dirzip` binary.
///
/// ## Panics
/// Panics if the `dirzip` binary cannot be found via `Command::cargo_bin`.
pub fn dirzip_cmd() -> Command {
    Command::cargo_bin("dirzip").expect("Failed to find dirzip binary for testing")
}

/// `dirzip_cmd` running in `work_dir`, with the user config location and
/// `DIRZIP_CONFIG` pointed away from the real user's settings.
pub fn isolated_cmd(work_dir: &Path) -> Command {
    let home = work_dir.join(".test-home");
    fs::create_dir_all(&home).expect("Failed to create isolated home directory");
    let mut cmd = dirzip_cmd();
    cmd.current_dir(work_dir)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("DIRZIP_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `a.txt` ("hello") and `sub/b.txt` ("world") under `root`.
pub fn write_sample_tree(root: &Path) {
    fs::create_dir_all(root.join("sub")).expect("Failed to create sample tree");
    fs::write(root.join("a.txt"), "hello").expect("Failed to write a.txt");
    fs::write(root.join("sub/b.txt"), "world").expect("Failed to write sub/b.txt");
}

/// Decompresses every entry of the archive at `path` into a name -> bytes map.
pub fn read_archive(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let file = File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Not a valid zip archive");
    let mut contents = BTreeMap::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).expect("Failed to read entry");
        let mut data = Vec::new();
        entry.read_to_end(&mut data).expect("Failed to decompress entry");
        contents.insert(entry.name().to_string(), data);
    }
    contents
}
