use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::errors::{GpgBatchError, Result};
use crate::core::models::target::has_suffix;
use crate::core::services::batch_runner::TEMP_PREFIX;

/// List the candidate files of `dir` for a batch operation.
///
/// Only regular files directly inside `dir` are returned (no recursion),
/// sorted by file name so repeated runs process files in the same order.
/// With `suffix_filter`, only names ending with that suffix are kept.
/// Names are matched byte for byte, so non-UTF-8 names are kept. In-flight
/// temporary outputs (names starting with `TEMP_PREFIX`) are never
/// candidates.
pub fn resolve(dir: &Path, suffix_filter: Option<&str>) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name() else {
            continue;
        };
        if is_temp_name(name) {
            continue;
        }
        if let Some(suffix) = suffix_filter
            && !has_suffix(name, suffix)
        {
            continue;
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Like [`resolve`], but keeps only files that do NOT end with `suffix`.
pub fn resolve_excluding(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let all = resolve(dir, None)?;
    Ok(all
        .into_iter()
        .filter(|p| p.file_name().is_some_and(|n| !has_suffix(n, suffix)))
        .collect())
}

fn is_temp_name(name: &OsStr) -> bool {
    name.as_encoded_bytes().starts_with(TEMP_PREFIX.as_bytes())
}

/// Fail with `InvalidPath` unless `dir` exists and is a directory.
pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(GpgBatchError::InvalidPath {
            path: dir.to_path_buf(),
            reason: "Directory does not exist".into(),
        });
    }
    if !dir.is_dir() {
        return Err(GpgBatchError::InvalidPath {
            path: dir.to_path_buf(),
            reason: "Path is not a directory".into(),
        });
    }
    Ok(())
}
