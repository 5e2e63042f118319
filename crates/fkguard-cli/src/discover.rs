//! SQL file discovery

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursively collect `*.sql` files under each path
///
/// A path may name a directory or a single file. Within a directory, entries
/// are visited in file-name order so reports are stable across runs.
pub fn discover_sql_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut sql_files = Vec::new();

    for path in paths {
        let before = sql_files.len();

        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("failed to walk {}", path.display()))?;

            if entry.file_type().is_file() && is_sql_file(entry.path()) {
                sql_files.push(entry.into_path());
            }
        }

        tracing::debug!(
            path = %path.display(),
            found = sql_files.len() - before,
            "discovered SQL files"
        );
    }

    Ok(sql_files)
}

fn is_sql_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".sql"))
}
