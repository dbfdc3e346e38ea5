//! # dirzip ZIP Archive Operations (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module packs a directory tree into a ZIP archive and reads back the
//! entry table of an existing archive.
//!
//! ## Architecture
//!
//! The module uses the `zip` crate for the container format (deflate entries,
//! ZIP64 when a file needs it) and `common::fs::walk` for enumeration.
//!
//! - The source directory is validated before the destination is touched.
//! - The destination is created (or truncated) and owned by a single `ZipWriter`
//!   for the whole run. Files are streamed into it one at a time as the walk
//!   visits them; nothing is buffered beyond the writer's own buffer.
//! - On success the writer is finished explicitly, which writes the central
//!   directory and flushes the file. On any failure, including one while
//!   writing the central directory, the writer is dropped and the partial
//!   archive is removed.
//! - Each entry records the file's modification time and, on Unix, its
//!   permission bits.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::zip::{self, ArchiveOptions};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let summary = zip::create_zip_from_dir(
//!     Path::new("./clean_publish"),
//!     Path::new("./clean_deploy.zip"),
//!     &ArchiveOptions::default(),
//! )?;
//! println!("{} files archived", summary.entries);
//!
//! for entry in zip::read_zip_entries(Path::new("./clean_deploy.zip"))? {
//!     println!("{} ({} bytes)", entry.name, entry.size);
//! }
//! # Ok(())
//! # }
//! ```
//!
use crate::common::fs::walk::{self, SourceFile};
use crate::core::error::{DirzipError, Result};
use chrono::{DateTime as ChronoDateTime, Datelike, Local, Timelike};
use std::fs::{self, File};
use std::io::{self, BufWriter, Seek, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// Files at or above this size need ZIP64 extensions.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Options controlling how entries are compressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Deflate level `1..=9`. `None` uses the codec default.
    pub compression_level: Option<i64>,
}

/// Outcome of a successful `create_zip_from_dir` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub output: PathBuf,
    /// Number of entries written (one per regular file).
    pub entries: usize,
    /// Total uncompressed bytes read from the source tree.
    pub bytes_read: u64,
}

/// One entry from an existing archive's central directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub name: String,
    pub size: u64,
    pub compressed_size: u64,
    pub method: String,
}

/// # Create ZIP Archive From Directory (`create_zip_from_dir`)
///
/// Writes every regular file beneath `source_root` into a new ZIP archive at
/// `output`, each under its `/`-separated path relative to `source_root` and
/// compressed with deflate. Directories are traversed but not stored.
///
/// An existing file at `output` is replaced. If `output` lies inside
/// `source_root`, the archive being written is left out of itself.
///
/// ## Errors
///
/// - `DirzipError::SourceNotFound` if `source_root` is missing or not a directory.
///   No archive is created in this case.
/// - `DirzipError::Io` if `output` cannot be created (missing parent directory,
///   permissions) or any source file cannot be read, or writing fails.
///
/// Any failure after the archive was opened removes the partial archive.
pub fn create_zip_from_dir(
    source_root: &Path,
    output: &Path,
    options: &ArchiveOptions,
) -> Result<ArchiveSummary> {
    if !source_root.is_dir() {
        anyhow::bail!(DirzipError::SourceNotFound {
            path: source_root.to_path_buf(),
        });
    }

    info!(
        "Archiving '{}' into '{}'",
        source_root.display(),
        output.display()
    );

    let file = File::create(output).map_err(|e| DirzipError::io(output, e))?;
    // Canonical path of the archive itself, so the walk can skip it.
    let output_canonical = match fs::canonicalize(output) {
        Ok(path) => path,
        Err(e) => {
            drop(file);
            discard_partial_archive(output);
            return Err(DirzipError::io(output, e).into());
        }
    };
    let writer = ZipWriter::new(BufWriter::new(file));

    match write_archive(writer, source_root, output, &output_canonical, options) {
        Ok((entries, bytes_read)) => {
            info!(
                "Wrote {} entries ({} bytes uncompressed) to '{}'",
                entries,
                bytes_read,
                output.display()
            );
            Ok(ArchiveSummary {
                output: output.to_path_buf(),
                entries,
                bytes_read,
            })
        }
        Err(err) => {
            // The writer has been dropped by now, so the handle is closed.
            discard_partial_archive(output);
            Err(err)
        }
    }
}

/// Writes the tree, then the central directory, then flushes `writer`.
/// Any error along the way is returned and the writer is dropped.
fn write_archive<W: Write + Seek>(
    mut writer: ZipWriter<W>,
    source_root: &Path,
    output: &Path,
    output_canonical: &Path,
    options: &ArchiveOptions,
) -> Result<(usize, u64)> {
    let totals = write_tree(&mut writer, source_root, output_canonical, options, output)?;
    let mut inner = writer.finish().map_err(|e| DirzipError::zip(output, e))?;
    inner.flush().map_err(|e| DirzipError::io(output, e))?;
    Ok(totals)
}

/// Streams every regular file under `source_root` into `writer`.
/// Returns the entry count and total bytes copied.
fn write_tree<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    source_root: &Path,
    output_canonical: &Path,
    options: &ArchiveOptions,
    output: &Path,
) -> Result<(usize, u64)> {
    let base_options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(options.compression_level);

    let canonical_root =
        fs::canonicalize(source_root).map_err(|e| DirzipError::io(source_root, e))?;

    let mut entries = 0usize;
    let mut bytes_read = 0u64;

    for source_file in walk::regular_files(&canonical_root) {
        let source_file = source_file?;
        if source_file.path == output_canonical {
            debug!(
                "Skipping the archive being written: {}",
                source_file.path.display()
            );
            continue;
        }

        bytes_read += write_entry(writer, &source_file, base_options, output)?;
        entries += 1;
    }

    Ok((entries, bytes_read))
}

/// Adds a single file as a deflate entry and returns the number of bytes copied.
fn write_entry<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    source_file: &SourceFile,
    base_options: SimpleFileOptions,
    output: &Path,
) -> Result<u64> {
    let metadata = &source_file.metadata;
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut entry_options = base_options
        .large_file(metadata.len() >= ZIP64_THRESHOLD)
        .last_modified_time(entry_timestamp(metadata));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        entry_options = entry_options.unix_permissions(metadata.permissions().mode());
    }

    writer
        .start_file(source_file.archive_name.as_str(), entry_options)
        .map_err(|e| DirzipError::zip(output, e))?;

    let mut source =
        File::open(&source_file.path).map_err(|e| DirzipError::io(&source_file.path, e))?;
    let copied =
        io::copy(&mut source, writer).map_err(|e| DirzipError::io(&source_file.path, e))?;

    debug!("Added '{}' ({} bytes)", source_file.archive_name, copied);
    Ok(copied)
}

/// Local modification time of a file as a ZIP timestamp.
///
/// ZIP timestamps start at 1980; earlier or unreadable times fall back to the
/// ZIP epoch.
fn entry_timestamp(metadata: &fs::Metadata) -> DateTime {
    let modified = match metadata.modified() {
        Ok(modified) => modified,
        Err(_) => return DateTime::default(),
    };
    let local: ChronoDateTime<Local> = ChronoDateTime::from(modified);
    let year = match u16::try_from(local.year()) {
        Ok(year) => year,
        Err(_) => return DateTime::default(),
    };
    DateTime::from_date_and_time(
        year,
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .unwrap_or_default()
}

/// Removes a partially written archive after a failed run.
fn discard_partial_archive(output: &Path) {
    match fs::remove_file(output) {
        Ok(()) => debug!("Removed partial archive '{}'", output.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            "Failed to remove partial archive '{}': {}",
            output.display(),
            e
        ),
    }
}

/// # Read ZIP Entries (`read_zip_entries`)
///
/// Returns the entries of the archive at `path` in central-directory order.
///
/// ## Errors
///
/// - `DirzipError::Io` if the file cannot be opened or read.
/// - `DirzipError::Archive` if the file is not a valid ZIP archive.
pub fn read_zip_entries(path: &Path) -> Result<Vec<EntryInfo>> {
    let file = File::open(path).map_err(|e| DirzipError::io(path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| DirzipError::zip(path, e))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive
            .by_index(index)
            .map_err(|e| DirzipError::zip(path, e))?;
        entries.push(EntryInfo {
            name: entry.name().to_string(),
            size: entry.size(),
            compressed_size: entry.compressed_size(),
            method: format!("{:?}", entry.compression()),
        });
    }
    debug!("Read {} entries from '{}'", entries.len(), path.display());
    Ok(entries)
}
