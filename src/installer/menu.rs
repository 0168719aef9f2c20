//! Desktop menu database refresh.
//!
//! Refreshing is best-effort: the installer records the outcome in a
//! [`MenuRefresh`] and never fails because of it.

use crate::constants::MENU_REFRESH_COMMAND;
use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Rebuilds the menu database for a launcher directory.
pub trait MenuRefresher {
    /// Refresh the database covering `applications_dir`.
    fn refresh(&self, applications_dir: &Path) -> Result<()>;
}

/// What happened to the menu database refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuRefresh {
    /// The refresh tool ran successfully
    Refreshed,
    /// The refresh was attempted and failed; the install went on
    Failed(String),
    /// Refreshing is disabled by configuration
    Skipped,
}

/// Runs `update-desktop-database <dir>`, or another program taking the directory as last argument.
#[derive(Debug, Clone)]
pub struct CommandMenuRefresher {
    program: String,
}

impl Default for CommandMenuRefresher {
    fn default() -> Self {
        Self {
            program: MENU_REFRESH_COMMAND.to_string(),
        }
    }
}

impl CommandMenuRefresher {
    /// Use a different refresh program.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl MenuRefresher for CommandMenuRefresher {
    fn refresh(&self, applications_dir: &Path) -> Result<()> {
        debug!("Running {} {}", self.program, applications_dir.display());
        let output = Command::new(&self.program)
            .arg(applications_dir)
            .output()
            .with_context(|| format!("Failed to run {}", self.program))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
