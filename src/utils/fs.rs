//! Filesystem helpers.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Recursively remove `dir`, treating absence as success.
///
/// Returns `true` when something was removed.
pub fn remove_dir_if_exists(dir: &Path) -> io::Result<bool> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// List regular files directly under `dir`, sorted by path.
///
/// A missing directory yields an empty list.
pub fn list_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}
