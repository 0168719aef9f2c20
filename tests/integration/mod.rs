//! Integration test suite for Fetchfox
//!
//! End-to-end tests that drive the `fetchfox` binary against a local
//! `file://` mirror, so no test ever touches the network.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: Argument validation and error reporting
//! - **install**: Fresh installs, up-to-date checks, forced reinstalls and failures
//! - **library**: The public installer API with in-memory fakes


mod cli;
mod install;
mod library;
