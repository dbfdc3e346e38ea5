//! # dirzip Directory Walking (`common::fs::walk`)
//!
//! File: cli/src/common/fs/walk.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Enumerates the regular files beneath a source directory and derives the
//! name each one is stored under inside an archive.
//!
//! ## Architecture
//!
//! - **`regular_files`**: A lazy iterator over `walkdir::WalkDir`. Directories are
//!   descended into but never yielded. A symbolic link to a regular file is
//!   yielded under the link's own name and read through to its target; links to
//!   directories are not descended into. Other non-regular entries are skipped.
//!   Siblings are visited in file-name order so the same tree always produces
//!   the same sequence.
//! - **`archive_name`**: Joins the components of a relative path with `/`, which
//!   is the separator ZIP entry names use on every platform.
//!
//! Walk failures (an unreadable subdirectory, a dangling symbolic link) are
//! yielded as `DirzipError::Io` items naming the path that failed.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::walk;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! for file in walk::regular_files(Path::new("./publish")) {
//!     let file = file?;
//!     println!("{} -> {}", file.path.display(), file.archive_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{DirzipError, Result};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A regular file discovered under the source root.
#[derive(Debug)]
pub struct SourceFile {
    /// Path on disk (the source root joined with the relative path).
    pub path: PathBuf,
    /// Entry name inside the archive, relative to the source root with `/` separators.
    pub archive_name: String,
    /// Metadata captured during the walk (size, modification time, permissions).
    /// For a symbolic link this describes the target file.
    pub metadata: Metadata,
}

/// Lazily yields every regular file beneath `root`.
///
/// `root` itself is never yielded, even if it is a file; callers validate it
/// beforehand. Each item is either a `SourceFile` or the error encountered while
/// walking, so iteration can be aborted on the first failure with `?`.
pub fn regular_files(root: &Path) -> impl Iterator<Item = Result<SourceFile>> + '_ {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => return Some(Err(walk_error(root, err))),
            };

            let metadata = if entry.file_type().is_symlink() {
                // Resolve the link; only links to regular files are archived.
                match fs::metadata(entry.path()) {
                    Ok(target) if target.is_file() => target,
                    Ok(_) => {
                        debug!(
                            "Skipping symbolic link to a non-file: {}",
                            entry.path().display()
                        );
                        return None;
                    }
                    Err(err) => {
                        return Some(Err(DirzipError::io(entry.path(), err).into()));
                    }
                }
            } else if entry.file_type().is_file() {
                match entry.metadata() {
                    Ok(metadata) => metadata,
                    Err(err) => return Some(Err(walk_error(root, err))),
                }
            } else {
                return None;
            };

            // WalkDir only yields paths beneath `root`, so the prefix is always present.
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            Some(Ok(SourceFile {
                archive_name: archive_name(relative),
                path: entry.into_path(),
                metadata,
            }))
        })
}

/// Builds an archive entry name from a path relative to the source root.
///
/// Components are joined with `/` regardless of the host separator. Names that
/// are not valid UTF-8 are converted lossily.
pub fn archive_name(relative: &Path) -> String {
    let parts: Vec<String> = relative
        .iter()
        .map(|part| match part.to_str() {
            Some(s) => s.to_owned(),
            None => {
                warn!(
                    "Path component {:?} in '{}' is not valid UTF-8; storing a lossy name",
                    part,
                    relative.display()
                );
                part.to_string_lossy().into_owned()
            }
        })
        .collect();
    parts.join("/")
}

/// Converts a `walkdir` error into `DirzipError::Io`, keeping the failing path.
fn walk_error(root: &Path, err: walkdir::Error) -> anyhow::Error {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = match err.into_io_error() {
        Some(io_err) => io_err,
        None => io::Error::other("filesystem loop detected"),
    };
    DirzipError::Io { path, source }.into()
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn names(root: &Path) -> Result<Vec<String>> {
        regular_files(root)
            .map(|file| file.map(|f| f.archive_name))
            .collect()
    }

    #[test]
    fn test_archive_name_joins_with_forward_slash() {
        let relative: PathBuf = ["sub", "deeper", "file.txt"].iter().collect();
        assert_eq!(archive_name(&relative), "sub/deeper/file.txt");
        assert_eq!(archive_name(Path::new("a.txt")), "a.txt");
    }

    #[test]
    fn test_regular_files_nested_tree() -> Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "hello")?;
        fs::create_dir_all(root.join("sub/inner"))?;
        fs::write(root.join("sub/b.txt"), "world")?;
        fs::write(root.join("sub/inner/c.bin"), [0u8, 1, 2])?;

        assert_eq!(names(root)?, vec!["a.txt", "sub/b.txt", "sub/inner/c.bin"]);
        Ok(())
    }

    #[test]
    fn test_regular_files_skips_directories() -> Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        fs::create_dir_all(root.join("empty/nested"))?;

        assert!(names(root)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_regular_files_records_metadata() -> Result<()> {
        let temp_dir = tempdir()?;
        fs::write(temp_dir.path().join("data.txt"), "12345")?;

        let files: Vec<SourceFile> = regular_files(temp_dir.path()).collect::<Result<_>>()?;
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].metadata.len(), 5);
        assert_eq!(files[0].path, temp_dir.path().join("data.txt"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_regular_files_follows_file_symlinks_only() -> Result<()> {
        let temp_dir = tempdir()?;
        let outside = tempdir()?;
        let root = temp_dir.path();
        fs::write(root.join("real.txt"), "x")?;
        fs::write(outside.path().join("shared.cfg"), "key = 1\n")?;
        std::os::unix::fs::symlink(outside.path().join("shared.cfg"), root.join("link.cfg"))?;
        fs::create_dir(root.join("dir"))?;
        fs::write(root.join("dir/inner.txt"), "y")?;
        std::os::unix::fs::symlink(root.join("dir"), root.join("dir_link"))?;

        assert_eq!(names(root)?, vec!["dir/inner.txt", "link.cfg", "real.txt"]);

        let link = regular_files(root)
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .find(|f| f.archive_name == "link.cfg")
            .unwrap();
        assert_eq!(link.metadata.len(), 8);
        assert_eq!(link.path, root.join("link.cfg"));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_regular_files_dangling_symlink_is_io_error() -> Result<()> {
        let temp_dir = tempdir()?;
        let root = temp_dir.path();
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt"))?;

        let err = names(root).unwrap_err();
        match err.downcast_ref::<DirzipError>() {
            Some(DirzipError::Io { path, .. }) => assert_eq!(path, &root.join("dangling.txt")),
            other => panic!("expected Io error, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_regular_files_missing_root_is_io_error() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        let first = regular_files(&missing).next();
        let err = first.expect("walk should report the missing root").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DirzipError>(),
            Some(DirzipError::Io { .. })
        ));
    }
}
