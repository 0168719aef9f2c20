//! Fetchfox - per-user Firefox installer for Linux
//!
//! Fetchfox downloads an official Firefox binary build, unpacks it into a
//! per-user directory and registers a desktop launcher for it, without root.
//! Every `(release, arch, locale)` combination is an independent
//! installation:
//!
//! ```text
//! ~/.local/share/fetchfox/<release>-<arch>-<locale>/firefox/
//! ~/.local/share/applications/Fetchfox-<release>-<arch>-<locale>.desktop
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! cli -> installer::plan -> version (local manifest, remote or pinned)
//!                        -> download::build_download_url
//!     -> installer::install -> download::Transport -> extract -> launcher -> menu refresh
//! ```
//!
//! # Modules
//!
//! - [`cli`] - argument parsing and console output
//! - [`config`] - optional global configuration and the on-disk layout
//! - [`core`] - release channels, architectures, install targets and errors
//! - [`download`] - archive URLs and the network transport
//! - [`installer`] - the install decision and procedure
//! - [`utils`] - file system helpers and the progress bar
//! - [`version`] - local and remote version resolution
//!
//! # Command-Line Usage
//!
//! ```bash
//! fetchfox stable
//! fetchfox devedition --locale de
//! fetchfox esr --arch linux --pin 78.0.2esr
//! fetchfox nightly --force
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod download;
pub mod installer;
pub mod utils;
pub mod version;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
