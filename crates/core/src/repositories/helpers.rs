//! Filesystem utilities for the document store.
//!
//! All writes go through a temporary file in the target's own directory, followed by a rename.
//! Readers therefore see either the old file or the complete new one, never a partial write.

use crate::constants::{TEMP_FILE_PREFIX, TEMP_FILE_SUFFIX};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

fn staged(dir: &Path, contents: &str) -> io::Result<NamedTempFile> {
    let mut tmp = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(TEMP_FILE_SUFFIX)
        .tempfile_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    Ok(tmp)
}

/// Atomically create `target`, failing with [`io::ErrorKind::AlreadyExists`] if it exists.
///
/// The existence check and the rename are a single step, so of two concurrent creators of the
/// same path exactly one succeeds.
pub(crate) fn write_new(dir: &Path, target: &Path, contents: &str) -> io::Result<()> {
    staged(dir, contents)?
        .persist_noclobber(target)
        .map(|_| ())
        .map_err(|e| e.error)
}

/// Atomically replace `target` with `contents`.
pub(crate) fn overwrite(dir: &Path, target: &Path, contents: &str) -> io::Result<()> {
    staged(dir, contents)?
        .persist(target)
        .map(|_| ())
        .map_err(|e| e.error)
}

/// Whether `path` is a regular file. A missing path is `Ok(false)`.
pub(crate) fn is_regular_file(path: &Path) -> io::Result<bool> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
