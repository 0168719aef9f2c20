//! `.tar.bz2` extraction.

use crate::core::FetchfoxError;
use anyhow::Result;
use bzip2::read::BzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tar::Archive;
use tracing::debug;

/// Unpack every entry of the bzip2-compressed tarball at `archive_path` under `dest`.
///
/// Entries that would land outside `dest` are skipped by `tar`. Any decode
/// or write failure is returned as [`FetchfoxError::ArchiveExtract`]; entries
/// unpacked before the failure stay on disk.
pub fn extract_tar_bz2(archive_path: &Path, dest: &Path) -> Result<()> {
    let fail = |reason: String| FetchfoxError::ArchiveExtract {
        archive: archive_path.display().to_string(),
        reason,
    };

    let file = File::open(archive_path).map_err(|e| fail(e.to_string()))?;
    let mut archive = Archive::new(BzDecoder::new(BufReader::new(file)));
    archive.set_preserve_permissions(true);
    archive.set_overwrite(true);

    archive.unpack(dest).map_err(|e| fail(e.to_string()))?;

    debug!("Extracted {} into {}", archive_path.display(), dest.display());
    Ok(())
}
