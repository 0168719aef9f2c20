//! File system helpers for the install procedure.
//!
//! The install directory is replaced by deleting the old tree and creating a
//! fresh one. Deletion is best-effort: every entry that cannot be removed is
//! logged and recorded in a [`CleanupReport`] instead of aborting the run.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A path that could not be removed and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupFailure {
    /// Entry that was left behind
    pub path: PathBuf,
    /// I/O error message
    pub reason: String,
}

/// Outcome of [`remove_dir_best_effort`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Whether the directory existed when cleanup started
    pub existed: bool,
    /// Entries removed
    pub removed: usize,
    /// Entries that could not be removed
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    /// True when every entry, including the root, was removed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Recursively remove `path`, continuing past entries that fail.
///
/// Children are visited before their parents. A missing `path` is not an
/// error and yields an empty report with `existed == false`.
pub fn remove_dir_best_effort(path: &Path) -> CleanupReport {
    let mut report = CleanupReport::default();

    if fs::symlink_metadata(path).is_err() {
        return report;
    }
    report.existed = true;

    for entry in WalkDir::new(path).contents_first(true).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let failed = e.path().map_or_else(|| path.to_path_buf(), Path::to_path_buf);
                warn!("Ignoring unreadable entry {}: {}", failed.display(), e);
                report.failures.push(CleanupFailure {
                    path: failed,
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let result = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };

        match result {
            Ok(()) => report.removed += 1,
            Err(e) => {
                warn!("Ignoring failure to remove {}: {}", entry.path().display(), e);
                report.failures.push(CleanupFailure {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        "Removed {} entries under {} ({} left behind)",
        report.removed,
        path.display(),
        report.failures.len()
    );
    report
}

/// Create `path` and any missing parents, setting `mode` on `path` itself.
#[cfg(unix)]
pub fn create_dir_with_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

    fs::DirBuilder::new()
        .recursive(true)
        .mode(mode)
        .create(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;

    // DirBuilder's mode is filtered through the umask; pin the leaf explicitly.
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
        .with_context(|| format!("Failed to set permissions on {}", path.display()))
}

/// Create `path` and any missing parents.
#[cfg(not(unix))]
pub fn create_dir_with_mode(path: &Path, _mode: u32) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Write `content` to `path`, replacing any existing file and creating the parent directory.
pub fn overwrite_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}
