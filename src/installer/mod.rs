//! Installation of a Firefox build for one install target.
//!
//! An install runs in two phases:
//!
//! ```text
//! plan:    read local manifest -> resolve remote or pinned version -> decide
//! install: download to temp dir -> replace install dir -> extract
//!          -> write launcher -> refresh menu database
//! ```
//!
//! [`Installer::plan`] has no side effects besides the versions request. When
//! the local version equals the requested one and `force` is off the plan is
//! [`InstallAction::UpToDate`] and nothing else happens.
//!
//! [`Installer::install`] downloads into a temporary directory that is
//! removed on every exit path. The previous install directory is deleted only
//! after the download completed, then recreated empty and filled from the
//! archive. There is no rollback: if extraction fails the target is left
//! without a working installation and no launcher is written.
//!
//! Two steps are best-effort and reported instead of raised: removal of the
//! previous tree ([`CleanupReport`]) and the menu database refresh
//! ([`MenuRefresh`]).
//!
//! No locking is performed; two processes installing the same target at the
//! same time race on the install directory.

mod archive;
mod launcher;
mod menu;

pub use archive::extract_tar_bz2;
pub use launcher::{DESKTOP_ENTRY_TEMPLATE, DesktopEntry, render_desktop_entry};
pub use menu::{CommandMenuRefresher, MenuRefresh, MenuRefresher};

use crate::config::{GlobalConfig, Layout};
use crate::constants::{
    DEFAULT_DISTRIBUTION_URL, DEFAULT_VERSIONS_URL, DOWNLOAD_FILE_NAME, INSTALL_DIR_MODE,
};
use crate::core::InstallTarget;
use crate::download::{Transport, build_download_url};
use crate::utils::{CleanupReport, create_dir_with_mode, overwrite_file, remove_dir_best_effort};
use crate::version::{VersionRequest, resolve_local_version, resolve_requested_version};
use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    /// Installation to create or update
    pub target: InstallTarget,
    /// Latest or pinned version
    pub version: VersionRequest,
    /// Reinstall even when the local version already matches
    pub force: bool,
}

/// Decision taken by [`Installer::plan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    /// Local version matches and no force; nothing to do
    UpToDate,
    /// Not installed, or installed at another version
    Install,
    /// Local version matches but force was requested
    Reinstall,
}

/// A resolved install, ready for [`Installer::install`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    /// Installation this plan is for
    pub target: InstallTarget,
    /// Version read from the local manifest, if installed
    pub local_version: Option<String>,
    /// Version to install
    pub version: String,
    /// Archive location
    pub url: String,
    /// Install directory of the target
    pub install_dir: PathBuf,
    /// Decision
    pub action: InstallAction,
}

impl InstallPlan {
    /// Whether [`Installer::install`] has work to do.
    #[must_use]
    pub fn needs_install(&self) -> bool {
        self.action != InstallAction::UpToDate
    }
}

/// Result of a completed install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Installed version
    pub version: String,
    /// Install directory
    pub install_dir: PathBuf,
    /// Launcher written
    pub desktop_entry_path: PathBuf,
    /// Size of the downloaded archive
    pub downloaded_bytes: u64,
    /// Removal of the previous tree
    pub cleanup: CleanupReport,
    /// Menu database refresh
    pub menu_refresh: MenuRefresh,
}

/// Result of [`Installer::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// Nothing was done
    UpToDate {
        /// The installed version
        version: String,
    },
    /// A build was installed
    Installed(InstallReport),
}

/// Installs Firefox builds under a [`Layout`].
pub struct Installer<T, M> {
    layout: Layout,
    transport: T,
    refresher: M,
    versions_url: String,
    distribution_url: String,
    refresh_menu_database: bool,
}

impl<T: Transport, M: MenuRefresher> Installer<T, M> {
    /// Installer against the public Mozilla endpoints.
    pub fn new(layout: Layout, transport: T, refresher: M) -> Self {
        Self {
            layout,
            transport,
            refresher,
            versions_url: DEFAULT_VERSIONS_URL.to_string(),
            distribution_url: DEFAULT_DISTRIBUTION_URL.to_string(),
            refresh_menu_database: true,
        }
    }

    /// Installer taking endpoints, directories and the refresh switch from `config`.
    pub fn from_config(config: &GlobalConfig, transport: T, refresher: M) -> Result<Self> {
        let layout = Layout::from_config(config)?;
        Ok(Self::new(layout, transport, refresher)
            .versions_url(config.versions_url())
            .distribution_url(config.distribution_url())
            .refresh_menu_database(config.refresh_menu_database))
    }

    /// Override the versions endpoint.
    #[must_use]
    pub fn versions_url(mut self, url: impl Into<String>) -> Self {
        self.versions_url = url.into();
        self
    }

    /// Override the distribution server base URL.
    #[must_use]
    pub fn distribution_url(mut self, url: impl Into<String>) -> Self {
        self.distribution_url = url.into();
        self
    }

    /// Enable or disable the menu database refresh.
    #[must_use]
    pub fn refresh_menu_database(mut self, enabled: bool) -> Self {
        self.refresh_menu_database = enabled;
        self
    }

    /// On-disk layout in use.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Resolve versions and decide whether to install.
    pub async fn plan(&self, request: &InstallRequest) -> Result<InstallPlan> {
        let target = &request.target;
        let local_version = resolve_local_version(&self.layout.manifest_path(target))?;

        let version = resolve_requested_version(
            &self.transport,
            &self.versions_url,
            target.channel,
            &request.version,
        )
        .await
        .with_context(|| format!("Failed to resolve version of {}", target.channel))?;

        let action = match (local_version.as_deref() == Some(version.as_str()), request.force) {
            (true, false) => InstallAction::UpToDate,
            (true, true) => InstallAction::Reinstall,
            (false, _) => InstallAction::Install,
        };
        debug!(
            "Plan for {}: local={:?} requested={} action={:?}",
            target, local_version, version, action
        );

        let url = build_download_url(
            &self.distribution_url,
            target.channel,
            &version,
            &target.locale,
            target.arch,
        );

        Ok(InstallPlan {
            target: target.clone(),
            local_version,
            version,
            url,
            install_dir: self.layout.install_dir(target),
            action,
        })
    }

    /// Carry out a plan that needs installing.
    pub async fn install(&self, plan: &InstallPlan) -> Result<InstallReport> {
        if !plan.needs_install() {
            bail!("{} is already at {}, nothing to install", plan.target, plan.version);
        }

        let download_dir = tempfile::Builder::new()
            .prefix("fetchfox-")
            .tempdir()
            .context("Failed to create temporary download directory")?;
        let archive_path = download_dir.path().join(DOWNLOAD_FILE_NAME);

        let downloaded_bytes = self
            .transport
            .download_to_file(&plan.url, &archive_path)
            .await
            .with_context(|| format!("Failed to download {}", plan.url))?;
        info!("Downloaded {} ({} bytes)", plan.url, downloaded_bytes);

        let install_dir = plan.install_dir.clone();
        let cleanup = tokio::task::spawn_blocking(move || {
            let cleanup = remove_dir_best_effort(&install_dir);
            create_dir_with_mode(&install_dir, INSTALL_DIR_MODE).map(|()| cleanup)
        })
        .await
        .context("Install directory preparation task failed")??;
        if !cleanup.is_clean() {
            warn!(
                "{} entries of the previous installation could not be removed",
                cleanup.failures.len()
            );
        }

        let install_dir = plan.install_dir.clone();
        tokio::task::spawn_blocking(move || extract_tar_bz2(&archive_path, &install_dir))
            .await
            .context("Extraction task failed")??;
        drop(download_dir);

        let entry = DesktopEntry::for_target(&self.layout, &plan.target);
        let desktop_entry_path = self.layout.desktop_entry_path(&plan.target);
        overwrite_file(&desktop_entry_path, &render_desktop_entry(&entry)?)?;
        debug!("Wrote launcher {}", desktop_entry_path.display());

        let menu_refresh = self.refresh_menu();
        info!("Installed {} {}", plan.target, plan.version);

        Ok(InstallReport {
            version: plan.version.clone(),
            install_dir: plan.install_dir.clone(),
            desktop_entry_path,
            downloaded_bytes,
            cleanup,
            menu_refresh,
        })
    }

    /// Plan, then install when needed.
    pub async fn run(&self, request: &InstallRequest) -> Result<InstallOutcome> {
        let plan = self.plan(request).await?;
        if !plan.needs_install() {
            return Ok(InstallOutcome::UpToDate {
                version: plan.version,
            });
        }
        self.install(&plan).await.map(InstallOutcome::Installed)
    }

    fn refresh_menu(&self) -> MenuRefresh {
        if !self.refresh_menu_database {
            debug!("Menu database refresh disabled");
            return MenuRefresh::Skipped;
        }

        match self.refresher.refresh(self.layout.applications_dir()) {
            Ok(()) => MenuRefresh::Refreshed,
            Err(e) => {
                warn!("Menu database refresh failed, continuing: {:#}", e);
                MenuRefresh::Failed(format!("{e:#}"))
            }
        }
    }
}
