//! Supporting utilities.
//!
//! - [`fs`] - best-effort directory removal, directory creation with a mode, file overwrite
//! - [`progress`] - download progress bar

pub mod fs;
pub mod progress;

pub use fs::{CleanupFailure, CleanupReport, create_dir_with_mode, overwrite_file, remove_dir_best_effort};
pub use progress::ProgressBar;
