//! Test fixtures: fake transport, recording menu refresher and archive builder.

use crate::core::FetchfoxError;
use crate::download::Transport;
use crate::installer::MenuRefresher;
use anyhow::{Result, bail};
use bzip2::Compression;
use bzip2::write::BzEncoder;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Build an in-memory `.tar.bz2` shaped like a Firefox release for `version`.
///
/// Contains `firefox/firefox`, `firefox/platform.ini` (with `[Build] Milestone`)
/// and one nested data file.
pub fn firefox_archive(version: &str) -> Vec<u8> {
    let manifest = format!("[Build]\nBuildID=20200101000000\nMilestone={version}\n");
    archive_with_files(&[
        ("firefox/firefox", "#!/bin/sh\nexit 0\n"),
        ("firefox/platform.ini", &manifest),
        ("firefox/browser/omni.ja", "omni"),
    ])
}

/// Build an in-memory `.tar.bz2` holding `files` as `(path, content)` pairs.
pub fn archive_with_files(files: &[(&str, &str)]) -> Vec<u8> {
    let encoder = BzEncoder::new(Vec::new(), Compression::fast());
    let mut builder = tar::Builder::new(encoder);
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o755);
        header.set_cksum();
        builder.append_data(&mut header, name, content.as_bytes()).expect("append tar entry");
    }
    builder.into_inner().expect("finish tar").finish().expect("finish bzip2")
}

/// Create `dir/locked/pinned` and make `locked` read-only so the file cannot
/// be deleted.
///
/// Returns `false` when the lock has no effect (running as root); callers
/// should skip their assertions then. Undo with [`unlock_dir`].
#[cfg(unix)]
pub fn lock_dir_with_file(dir: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let locked = dir.join("locked");
    std::fs::create_dir_all(&locked).expect("create locked dir");
    std::fs::write(locked.join("pinned"), "pinned").expect("write pinned file");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555))
        .expect("make dir read-only");

    let writable = std::fs::write(locked.join("write-check"), "").is_ok();
    if writable {
        let _ = std::fs::remove_file(locked.join("write-check"));
    }
    !writable
}

/// Restore write access to the directory locked by [`lock_dir_with_file`].
#[cfg(unix)]
pub fn unlock_dir(dir: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = std::fs::set_permissions(dir.join("locked"), std::fs::Permissions::from_mode(0o755));
}

/// Versions endpoint body with every channel field set.
pub fn versions_json(stable: &str) -> String {
    format!(
        r#"{{
  "FIREFOX_DEVEDITION": "79.0b3",
  "FIREFOX_ESR": "68.10.0esr",
  "FIREFOX_NIGHTLY": "80.0a1",
  "LATEST_FIREFOX_DEVEL_VERSION": "79.0b3",
  "LATEST_FIREFOX_VERSION": "{stable}"
}}"#
    )
}

/// In-memory [`Transport`] that records every request.
#[derive(Debug, Default)]
pub struct FakeTransport {
    versions: Option<String>,
    archive: Option<Vec<u8>>,
    gets: Mutex<Vec<String>>,
    downloads: Mutex<Vec<String>>,
}

impl FakeTransport {
    /// A transport with no responses; every request fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every `get_bytes` with `body`.
    #[must_use]
    pub fn with_versions(mut self, body: impl Into<String>) -> Self {
        self.versions = Some(body.into());
        self
    }

    /// Answer every `download_to_file` with `archive`.
    #[must_use]
    pub fn with_archive(mut self, archive: Vec<u8>) -> Self {
        self.archive = Some(archive);
        self
    }

    /// URLs passed to `get_bytes`, in order.
    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().expect("gets lock").clone()
    }

    /// URLs passed to `download_to_file`, in order.
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().expect("downloads lock").clone()
    }
}

impl Transport for FakeTransport {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.gets.lock().expect("gets lock").push(url.to_string());
        match &self.versions {
            Some(body) => Ok(body.clone().into_bytes()),
            None => Err(FetchfoxError::Network {
                url: url.to_string(),
                reason: "no response configured".to_string(),
            }
            .into()),
        }
    }

    async fn download_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        self.downloads.lock().expect("downloads lock").push(url.to_string());
        match &self.archive {
            Some(archive) => {
                std::fs::write(dest, archive)?;
                Ok(archive.len() as u64)
            }
            None => Err(FetchfoxError::HttpStatus {
                url: url.to_string(),
                status: 404,
            }
            .into()),
        }
    }
}

/// [`MenuRefresher`] that records the directories it was asked to refresh.
#[derive(Debug, Default)]
pub struct RecordingRefresher {
    fail: bool,
    calls: Mutex<Vec<PathBuf>>,
}

impl RecordingRefresher {
    /// A refresher that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// A refresher that always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Mutex::default(),
        }
    }

    /// Directories passed to `refresh`, in order.
    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl MenuRefresher for RecordingRefresher {
    fn refresh(&self, applications_dir: &Path) -> Result<()> {
        self.calls.lock().expect("calls lock").push(applications_dir.to_path_buf());
        if self.fail {
            bail!("update-desktop-database: command not found");
        }
        Ok(())
    }
}
