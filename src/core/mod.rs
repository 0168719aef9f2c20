//! Core types and error handling for Fetchfox.
//!
//! - [`error`] - [`FetchfoxError`], [`ErrorContext`] and [`user_friendly_error`]
//! - [`release`] - [`ReleaseChannel`], [`Architecture`] and [`InstallTarget`]

pub mod error;
pub mod release;

pub use error::{ErrorContext, FetchfoxError, user_friendly_error};
pub use release::{Architecture, InstallTarget, ReleaseChannel, resolve_name_suffix};
