//! Configuration for Fetchfox.
//!
//! - [`GlobalConfig`] - optional user settings from `~/.config/fetchfox/config.toml`
//! - [`Layout`] - where installations and launchers live on disk

mod global;
mod layout;

pub use global::GlobalConfig;
pub use layout::Layout;
