//! Input directory scanner for merge sources

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// List the CSV files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into. An empty result is an error:
/// there is nothing to merge.
pub fn discover_csv_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::InputDirectory {
            path: dir.to_path_buf(),
            source: e,
        })?;

        if entry.file_type().is_file() && is_csv(entry.path()) {
            files.push(entry.into_path());
        } else {
            debug!(path = %entry.path().display(), "skipping non-CSV entry");
        }
    }

    if files.is_empty() {
        return Err(Error::NoInputFiles(dir.to_path_buf()));
    }

    Ok(files)
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
