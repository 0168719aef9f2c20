//! The install command: plan, report the decision, install, report the result.

use crate::download::Transport;
use crate::installer::{
    InstallAction, InstallReport, InstallRequest, Installer, MenuRefresh, MenuRefresher,
};
use anyhow::Result;
use colored::Colorize;
use tracing::debug;

/// Run one install request, printing progress messages to stdout.
///
/// Returns `Ok(None)` when the target was already up to date.
pub async fn execute<T: Transport, M: MenuRefresher>(
    installer: &Installer<T, M>,
    request: &InstallRequest,
) -> Result<Option<InstallReport>> {
    let plan = installer.plan(request).await?;
    let local = plan.local_version.as_deref().unwrap_or_default();

    match plan.action {
        InstallAction::UpToDate => {
            println!("{}", format!("Local version is up to date ({local})").green());
            return Ok(None);
        }
        InstallAction::Reinstall => {
            println!(
                "{}",
                format!("Local version is up to date ({local}) but will force reinstall").yellow()
            );
        }
        InstallAction::Install => {}
    }

    println!("Will install {} at {}", plan.target.channel, plan.version.bold());
    println!("Downloading from {}", plan.url.cyan());

    let report = installer.install(&plan).await?;

    if let MenuRefresh::Failed(reason) = &report.menu_refresh {
        debug!("Menu database refresh failed: {}", reason);
    }
    if !report.cleanup.is_clean() {
        println!(
            "{}",
            format!(
                "{} files of the previous installation could not be removed",
                report.cleanup.failures.len()
            )
            .yellow()
        );
    }

    println!("{}", "Done".green());
    Ok(Some(report))
}
