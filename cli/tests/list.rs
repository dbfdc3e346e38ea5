//! # dirzip CLI List Integration Tests
//!
//! File: cli/tests/list.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Integration tests for `dirzip list`, run against archives produced by
//! `dirzip create`.
//!

mod common;
use common::*;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_list_created_archive() {
    let work = tempdir().unwrap();
    write_sample_tree(&work.path().join("src"));

    isolated_cmd(work.path())
        .args(["create", "src", "-o", "out.zip"])
        .assert()
        .success();

    isolated_cmd(work.path())
        .args(["list", "out.zip"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("a.txt")
                .and(predicate::str::contains("sub/b.txt"))
                .and(predicate::str::contains("Deflated"))
                .and(predicate::str::contains("2 entries, 10 bytes")),
        );
}

#[test]
fn test_list_not_a_zip() {
    let work = tempdir().unwrap();
    fs::write(work.path().join("fake.zip"), "plain text").unwrap();

    isolated_cmd(work.path())
        .args(["list", "fake.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Archive error"));
}

#[test]
fn test_list_missing_archive() {
    let work = tempdir().unwrap();

    isolated_cmd(work.path())
        .args(["list", "missing.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}
