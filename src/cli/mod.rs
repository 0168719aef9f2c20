//! Command-line interface for Fetchfox.
//!
//! ```bash
//! fetchfox stable                       # latest stable, en-US, x86_64
//! fetchfox esr --locale de --arch linux # latest ESR, German, i686
//! fetchfox nightly --pin 80.0a1         # exactly this version
//! fetchfox dev --force                  # reinstall even if up to date
//! ```
//!
//! Release and architecture are validated by the parser before anything else
//! runs. Configuration is read from `~/.config/fetchfox/config.toml` when
//! present; `--data-dir` and `--applications-dir` take precedence over it.

mod install;

use crate::config::GlobalConfig;
use crate::constants::DEFAULT_LOCALE;
use crate::core::{Architecture, InstallTarget, ReleaseChannel};
use crate::download::HttpTransport;
use crate::installer::{CommandMenuRefresher, InstallRequest, Installer};
use crate::version::VersionRequest;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Runtime settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging
    pub log_level: Option<String>,
    /// Hide the download progress bar
    pub no_progress: bool,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Install the tracing subscriber. `RUST_LOG` overrides the configured level.
    pub fn init_logging(&self) {
        let Some(level) = &self.log_level else {
            return;
        };

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

/// Fetch and install Firefox official binary build for current user.
#[derive(Parser, Debug)]
#[command(name = "fetchfox", version, author)]
pub struct Cli {
    /// Release to install
    #[arg(value_enum)]
    release: ReleaseChannel,

    /// Locale to use
    #[arg(long, default_value = DEFAULT_LOCALE)]
    locale: String,

    /// Arch to use. `linux` for Linux i686, `linux64` for Linux x86_64
    #[arg(long, value_enum, default_value_t = Architecture::Linux64)]
    arch: Architecture,

    /// Specific version to use, for example 78.0.2. Defaults to latest version
    #[arg(long, value_name = "VERSION")]
    pin: Option<String>,

    /// Force (re)install, even if local version is the same
    #[arg(long)]
    force: bool,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress log output and the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Do not show the download progress bar
    #[arg(long)]
    no_progress: bool,

    /// Configuration file to use instead of ~/.config/fetchfox/config.toml
    #[arg(long, env = "FETCHFOX_CONFIG_PATH", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Root of the install directories [default: ~/.local/share/fetchfox]
    #[arg(long, env = "FETCHFOX_DATA_DIR", value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Directory receiving the launcher [default: ~/.local/share/applications]
    #[arg(long, env = "FETCHFOX_APPLICATIONS_DIR", value_name = "DIR")]
    applications_dir: Option<PathBuf>,
}

impl Cli {
    /// Execute with settings derived from the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.quiet {
            None
        } else if self.verbose {
            Some("fetchfox=debug".to_string())
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress || self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// The install request described by the positional and install flags.
    #[must_use]
    pub fn install_request(&self) -> InstallRequest {
        InstallRequest {
            target: InstallTarget::new(self.release, self.arch, self.locale.clone()),
            version: VersionRequest::from_pin(self.pin.clone()),
            force: self.force,
        }
    }

    /// Execute with an explicit [`CliConfig`].
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let mut global = GlobalConfig::load_with_optional(config.config_path.clone()).await?;
        if let Some(dir) = &self.data_dir {
            global.data_dir = Some(dir.clone());
        }
        if let Some(dir) = &self.applications_dir {
            global.applications_dir = Some(dir.clone());
        }
        debug!("Effective configuration: {:?}", global);

        let transport = HttpTransport::new()?.show_progress(!config.no_progress);
        let installer = Installer::from_config(&global, transport, CommandMenuRefresher::default())?;

        install::execute(&installer, &self.install_request()).await?;
        Ok(())
    }
}
