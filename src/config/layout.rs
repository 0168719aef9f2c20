//! On-disk layout of installations and launchers.
//!
//! ```text
//! <data_dir>/<release>-<arch>-<locale>/firefox/            install tree
//! <data_dir>/<release>-<arch>-<locale>/firefox/platform.ini manifest
//! <applications_dir>/Fetchfox-<release>-<arch>-<locale>.desktop
//! ```
//!
//! `data_dir` defaults to `~/.local/share/fetchfox` and `applications_dir`
//! to `~/.local/share/applications`.

use crate::config::GlobalConfig;
use crate::constants::{EXECUTABLE_RELATIVE_PATH, MANIFEST_RELATIVE_PATH};
use crate::core::{FetchfoxError, InstallTarget};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Resolved data and launcher roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    data_dir: PathBuf,
    applications_dir: PathBuf,
}

impl Layout {
    /// Use explicit roots.
    pub fn new(data_dir: impl Into<PathBuf>, applications_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            applications_dir: applications_dir.into(),
        }
    }

    /// Take roots from the configuration, defaulting under `~/.local/share`.
    pub fn from_config(config: &GlobalConfig) -> Result<Self> {
        let share = || -> Result<PathBuf> {
            let home = dirs::home_dir().ok_or(FetchfoxError::HomeDirNotFound)?;
            Ok(home.join(".local").join("share"))
        };

        let data_dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => share()?.join("fetchfox"),
        };
        let applications_dir = match &config.applications_dir {
            Some(dir) => dir.clone(),
            None => share()?.join("applications"),
        };

        Ok(Self::new(data_dir, applications_dir))
    }

    /// Root holding all install directories.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory holding the launchers; the menu database refresh runs over it.
    #[must_use]
    pub fn applications_dir(&self) -> &Path {
        &self.applications_dir
    }

    /// The one directory owned by `target`.
    #[must_use]
    pub fn install_dir(&self, target: &InstallTarget) -> PathBuf {
        self.data_dir.join(target.slug())
    }

    /// `platform.ini` of `target`'s installation.
    #[must_use]
    pub fn manifest_path(&self, target: &InstallTarget) -> PathBuf {
        self.install_dir(target).join(MANIFEST_RELATIVE_PATH)
    }

    /// Browser executable of `target`'s installation.
    #[must_use]
    pub fn executable_path(&self, target: &InstallTarget) -> PathBuf {
        self.install_dir(target).join(EXECUTABLE_RELATIVE_PATH)
    }

    /// Launcher file of `target`.
    #[must_use]
    pub fn desktop_entry_path(&self, target: &InstallTarget) -> PathBuf {
        self.applications_dir.join(format!("{}.desktop", target.instance_class()))
    }
}
