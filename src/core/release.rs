//! Release channels, architectures and install targets.
//!
//! A [`ReleaseChannel`] carries both of its lookups (versions-API field and
//! launcher display suffix) as total functions, so an unsupported channel can
//! only ever surface while parsing user input.

use crate::core::FetchfoxError;
use clap::ValueEnum;
use std::fmt;
use std::str::FromStr;

/// A Firefox update track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ReleaseChannel {
    /// Regular release
    Stable,
    /// Beta
    Dev,
    /// Developer Edition
    Devedition,
    /// Extended Support Release
    Esr,
    /// Nightly
    Nightly,
}

impl ReleaseChannel {
    /// All supported channels.
    pub const ALL: [Self; 5] = [Self::Stable, Self::Dev, Self::Devedition, Self::Esr, Self::Nightly];

    /// Name used on the command line and in install directory names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Dev => "dev",
            Self::Devedition => "devedition",
            Self::Esr => "esr",
            Self::Nightly => "nightly",
        }
    }

    /// Field of the product-details versions response holding this channel's version.
    #[must_use]
    pub const fn api_field(self) -> &'static str {
        match self {
            Self::Stable => "LATEST_FIREFOX_VERSION",
            Self::Dev => "LATEST_FIREFOX_DEVEL_VERSION",
            Self::Devedition => "FIREFOX_DEVEDITION",
            Self::Esr => "FIREFOX_ESR",
            Self::Nightly => "FIREFOX_NIGHTLY",
        }
    }

    /// Suffix appended to the launcher display name. Includes the leading space.
    #[must_use]
    pub const fn name_suffix(self) -> &'static str {
        match self {
            Self::Stable => " Stable",
            Self::Dev => " Dev",
            Self::Devedition => " Developer",
            Self::Esr => " ESR",
            Self::Nightly => " Nightly",
        }
    }

    /// Top-level directory on the distribution server.
    #[must_use]
    pub const fn distribution_root(self) -> &'static str {
        match self {
            Self::Devedition => "devedition",
            _ => "firefox",
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = FetchfoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|channel| channel.as_str() == s).ok_or_else(|| {
            FetchfoxError::UnsupportedRelease {
                release: s.to_string(),
            }
        })
    }
}

/// Look up the launcher suffix for a channel name.
///
/// Fails with [`FetchfoxError::UnsupportedRelease`] for anything that is not a
/// supported channel.
pub fn resolve_name_suffix(release: &str) -> Result<&'static str, FetchfoxError> {
    release.parse::<ReleaseChannel>().map(ReleaseChannel::name_suffix)
}

/// Build architecture of the downloaded archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum Architecture {
    /// 32-bit x86
    Linux,
    /// x86_64
    #[default]
    #[value(name = "linux64")]
    Linux64,
}

impl Architecture {
    /// Name used on the command line and in install directory names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Linux64 => "linux64",
        }
    }

    /// Path segment used by the distribution server.
    #[must_use]
    pub const fn distribution_segment(self) -> &'static str {
        match self {
            Self::Linux => "linux-i686",
            Self::Linux64 => "linux-x86_64",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = FetchfoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Self::Linux),
            "linux64" => Ok(Self::Linux64),
            other => Err(FetchfoxError::UnsupportedArchitecture {
                arch: other.to_string(),
            }),
        }
    }
}

/// One independent local installation: `(channel, arch, locale)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstallTarget {
    /// Release channel
    pub channel: ReleaseChannel,
    /// Archive architecture
    pub arch: Architecture,
    /// Locale, passed through unvalidated
    pub locale: String,
}

impl InstallTarget {
    /// Create a target.
    pub fn new(channel: ReleaseChannel, arch: Architecture, locale: impl Into<String>) -> Self {
        Self {
            channel,
            arch,
            locale: locale.into(),
        }
    }

    /// `<channel>-<arch>-<locale>`, the install directory name.
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}-{}-{}", self.channel, self.arch, self.locale)
    }

    /// `Fetchfox-<channel>-<arch>-<locale>`, the launcher window class and desktop file stem.
    #[must_use]
    pub fn instance_class(&self) -> String {
        format!("Fetchfox-{}", self.slug())
    }
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug())
    }
}
