//! Global configuration management for Fetchfox.
//!
//! Fetchfox works without any configuration. An optional TOML file lets a
//! user point it at a mirror, relocate the install and launcher roots, or turn
//! off the desktop menu database refresh.
//!
//! # Configuration File Location
//!
//! `~/.config/fetchfox/config.toml` (`$XDG_CONFIG_HOME` is honored). The
//! location can be overridden with `--config` or `FETCHFOX_CONFIG_PATH`.
//!
//! # File Format
//!
//! ```toml
//! versions_url = "https://product-details.mozilla.org/1.0/firefox_versions.json"
//! distribution_url = "https://ftp.mozilla.org"
//! data_dir = "/home/me/.local/share/fetchfox"
//! applications_dir = "/home/me/.local/share/applications"
//! refresh_menu_database = true
//! ```
//!
//! Every key is optional; a missing file is the same as an empty one.

use crate::constants::{DEFAULT_DISTRIBUTION_URL, DEFAULT_VERSIONS_URL};
use crate::core::FetchfoxError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

const fn default_refresh_menu_database() -> bool {
    true
}

/// User-wide Fetchfox settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Versions metadata endpoint. Defaults to [`DEFAULT_VERSIONS_URL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versions_url: Option<String>,

    /// Base URL of the distribution server. Defaults to [`DEFAULT_DISTRIBUTION_URL`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_url: Option<String>,

    /// Root holding one directory per install target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Directory receiving the `.desktop` launchers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications_dir: Option<PathBuf>,

    /// Run `update-desktop-database` after writing a launcher.
    #[serde(default = "default_refresh_menu_database")]
    pub refresh_menu_database: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            versions_url: None,
            distribution_url: None,
            data_dir: None,
            applications_dir: None,
            refresh_menu_database: default_refresh_menu_database(),
        }
    }
}

impl GlobalConfig {
    /// Load from the default location, falling back to defaults when absent.
    pub async fn load() -> Result<Self> {
        Self::load_with_optional(None).await
    }

    /// Load from `path` when given, otherwise from [`default_path`](Self::default_path).
    ///
    /// A missing file yields the default configuration.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load from an explicit path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            FetchfoxError::ConfigError {
                message: format!("{}: {e}", path.display()),
            }
            .into()
        })
    }

    /// Write the configuration to `path`, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// `~/.config/fetchfox/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(FetchfoxError::HomeDirNotFound)?;
        Ok(config_dir.join("fetchfox").join("config.toml"))
    }

    /// Effective versions endpoint.
    #[must_use]
    pub fn versions_url(&self) -> &str {
        self.versions_url.as_deref().unwrap_or(DEFAULT_VERSIONS_URL)
    }

    /// Effective distribution base URL, without a trailing slash.
    #[must_use]
    pub fn distribution_url(&self) -> &str {
        self.distribution_url.as_deref().unwrap_or(DEFAULT_DISTRIBUTION_URL).trim_end_matches('/')
    }
}
