//! Version resolution.
//!
//! Versions are opaque strings (`"78.0.2"`, `"80.0a1"`, `"78.0.2esr"`) and are
//! only ever compared for equality; nothing here parses them.
//!
//! - [`resolve_local_version`] reads `[Build] Milestone` from the
//!   `platform.ini` manifest shipped inside an installation.
//! - [`resolve_remote_version`] looks the channel up in the product-details
//!   versions endpoint.
//! - [`VersionRequest::Pinned`] bypasses the remote lookup entirely.

use crate::constants::{MANIFEST_SECTION, MANIFEST_VERSION_KEY};
use crate::core::{FetchfoxError, ReleaseChannel};
use crate::download::Transport;
use anyhow::{Context, Result};
use ini::Ini;
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Which version the caller wants installed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionRequest {
    /// Whatever the versions endpoint reports for the channel
    #[default]
    Latest,
    /// Exactly this version, not checked against the remote catalog
    Pinned(String),
}

impl VersionRequest {
    /// `Pinned` when a non-empty pin was given, `Latest` otherwise.
    pub fn from_pin(pin: Option<String>) -> Self {
        match pin {
            Some(pin) if !pin.trim().is_empty() => Self::Pinned(pin),
            _ => Self::Latest,
        }
    }
}

impl fmt::Display for VersionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Pinned(version) => write!(f, "{version} (pinned)"),
        }
    }
}

/// Read the installed version from the manifest at `manifest_path`.
///
/// Returns `Ok(None)` when the manifest does not exist. A manifest that exists
/// but cannot be parsed, or lacks `[Build] Milestone`, is an error.
pub fn resolve_local_version(manifest_path: &Path) -> Result<Option<String>> {
    if !manifest_path.is_file() {
        debug!("No manifest at {}, treating as not installed", manifest_path.display());
        return Ok(None);
    }

    let manifest = Ini::load_from_file(manifest_path).map_err(|e| FetchfoxError::ManifestParse {
        path: manifest_path.display().to_string(),
        reason: e.to_string(),
    })?;

    let version = manifest
        .section(Some(MANIFEST_SECTION))
        .and_then(|section| section.get(MANIFEST_VERSION_KEY))
        .ok_or_else(|| FetchfoxError::ManifestKeyMissing {
            path: manifest_path.display().to_string(),
            section: MANIFEST_SECTION.to_string(),
            key: MANIFEST_VERSION_KEY.to_string(),
        })?;

    debug!("Local version {} from {}", version, manifest_path.display());
    Ok(Some(version.to_string()))
}

/// Ask the versions endpoint for the current version of `channel`.
///
/// One request, no retry. The response must be a JSON object; only the
/// channel's own field has to hold a string, other fields are ignored.
pub async fn resolve_remote_version<T: Transport>(
    transport: &T,
    versions_url: &str,
    channel: ReleaseChannel,
) -> Result<String> {
    let body = transport
        .get_bytes(versions_url)
        .await
        .with_context(|| format!("Failed to fetch versions for {channel}"))?;

    let versions: Map<String, Value> =
        serde_json::from_slice(&body).map_err(|e| FetchfoxError::RemoteVersionParse {
            url: versions_url.to_string(),
            reason: e.to_string(),
        })?;

    let field = channel.api_field();
    let value = versions.get(field).ok_or_else(|| FetchfoxError::RemoteVersionMissing {
        field: field.to_string(),
    })?;
    let version = value.as_str().ok_or_else(|| FetchfoxError::RemoteVersionParse {
        url: versions_url.to_string(),
        reason: format!("'{field}' is {value}, expected a version string"),
    })?;

    debug!("Remote version for {} is {}", channel, version);
    Ok(version.to_string())
}

/// Resolve a [`VersionRequest`], touching the network only for `Latest`.
pub async fn resolve_requested_version<T: Transport>(
    transport: &T,
    versions_url: &str,
    channel: ReleaseChannel,
    request: &VersionRequest,
) -> Result<String> {
    match request {
        VersionRequest::Pinned(version) => {
            debug!("Using pinned version {}", version);
            Ok(version.clone())
        }
        VersionRequest::Latest => resolve_remote_version(transport, versions_url, channel).await,
    }
}
