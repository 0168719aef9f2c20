//! Archive location and transfer.
//!
//! [`build_download_url`] maps an install target and version to the archive
//! on the distribution server:
//!
//! ```text
//! https://ftp.mozilla.org/pub/<root>/releases/<version>/<arch>/<locale>/firefox-<version>.tar.bz2
//! ```
//!
//! `<root>` is `devedition` for the Developer Edition channel and `firefox`
//! for every other channel. `<arch>` is `linux-x86_64` or `linux-i686`.
//!
//! Version and locale are substituted verbatim. They are expected to be
//! URL-safe already; nothing is escaped.
//!
//! The [`transport`] submodule performs the actual requests.

pub mod transport;

pub use transport::{HttpTransport, Transport};

use crate::core::{Architecture, ReleaseChannel};

/// Build the archive URL below `base` (e.g. `https://ftp.mozilla.org`).
#[must_use]
pub fn build_download_url(
    base: &str,
    channel: ReleaseChannel,
    version: &str,
    locale: &str,
    arch: Architecture,
) -> String {
    format!(
        "{}/pub/{}/releases/{}/{}/{}/firefox-{}.tar.bz2",
        base.trim_end_matches('/'),
        channel.distribution_root(),
        version,
        arch.distribution_segment(),
        locale,
        version
    )
}
