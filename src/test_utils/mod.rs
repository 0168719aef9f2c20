//! Test utilities for Fetchfox
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration tests under `tests/`.
//!
//! - [`FakeTransport`] serves a versions document and an archive from memory
//! - [`RecordingRefresher`] stands in for `update-desktop-database`
//! - [`firefox_archive`] builds a minimal release tarball
//!
//! # Example
//!
//! ```rust,no_run
//! use fetchfox::test_utils::{FakeTransport, firefox_archive, versions_json};
//!
//! let transport = FakeTransport::new()
//!     .with_versions(versions_json("78.0.2"))
//!     .with_archive(firefox_archive("78.0.2"));
//! ```

pub mod fixtures;

pub use fixtures::{
    FakeTransport, RecordingRefresher, archive_with_files, firefox_archive, versions_json,
};
#[cfg(unix)]
pub use fixtures::{lock_dir_with_file, unlock_dir};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; does nothing when neither
/// is set. Safe to call from every test.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
