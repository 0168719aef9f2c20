//! Error handling for Fetchfox
//!
//! Fetchfox distinguishes a small set of failure kinds, each of them fatal
//! unless the installer explicitly treats the step as best-effort:
//!
//! - **Usage**: [`FetchfoxError::UnsupportedRelease`], [`FetchfoxError::UnsupportedArchitecture`]
//! - **Manifest corruption**: [`FetchfoxError::ManifestParse`], [`FetchfoxError::ManifestKeyMissing`]
//! - **Network / API**: [`FetchfoxError::Network`], [`FetchfoxError::HttpStatus`],
//!   [`FetchfoxError::RemoteVersionParse`], [`FetchfoxError::RemoteVersionMissing`]
//! - **Archive**: [`FetchfoxError::ArchiveExtract`]
//! - **Environment**: [`FetchfoxError::HomeDirNotFound`], [`FetchfoxError::ConfigError`]
//!
//! Library code returns `anyhow::Result` and wraps these variants with
//! additional context. The binary converts whatever bubbles up into an
//! [`ErrorContext`] via [`user_friendly_error`] and exits non-zero.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fetchfox::core::{FetchfoxError, user_friendly_error};
//!
//! let err = anyhow::Error::from(FetchfoxError::UnsupportedArchitecture {
//!     arch: "arm64".to_string(),
//! });
//! user_friendly_error(err).display();
//! ```

use colored::Colorize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Every failure Fetchfox knows how to name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchfoxError {
    /// The requested release channel is not one of the supported channels.
    #[error("Unsupported release: {release}")]
    UnsupportedRelease {
        /// The value that failed to parse
        release: String,
    },

    /// The requested architecture is not `linux` or `linux64`.
    #[error("Unsupported arch: {arch}")]
    UnsupportedArchitecture {
        /// The value that failed to parse
        arch: String,
    },

    /// The local `platform.ini` exists but is not valid INI.
    #[error("Failed to parse local manifest {path}: {reason}")]
    ManifestParse {
        /// Path of the manifest
        path: String,
        /// Parser message
        reason: String,
    },

    /// The local `platform.ini` exists but lacks the version entry.
    #[error("Local manifest {path} has no [{section}] {key} entry")]
    ManifestKeyMissing {
        /// Path of the manifest
        path: String,
        /// Expected INI section
        section: String,
        /// Expected key within the section
        key: String,
    },

    /// The HTTP request could not be performed.
    #[error("Request to {url} failed: {reason}")]
    Network {
        /// Requested URL
        url: String,
        /// Transport error message
        reason: String,
    },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The versions endpoint did not return a JSON object of version strings.
    #[error("Failed to decode versions response from {url}: {reason}")]
    RemoteVersionParse {
        /// Versions endpoint
        url: String,
        /// Decoder message
        reason: String,
    },

    /// The versions endpoint response has no field for the requested channel.
    #[error("Versions response has no '{field}' field")]
    RemoteVersionMissing {
        /// The API field that was looked up
        field: String,
    },

    /// The downloaded archive could not be decoded or unpacked.
    #[error("Failed to extract archive {archive}: {reason}")]
    ArchiveExtract {
        /// Path of the downloaded archive
        archive: String,
        /// Decoder or I/O message
        reason: String,
    },

    /// The user's home directory could not be determined.
    #[error("Unable to determine home directory")]
    HomeDirNotFound,

    /// The configuration file is unreadable or invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Anything else.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// An error with optional user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying Fetchfox error
    pub error: FetchfoxError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no suggestion or details.
    #[must_use]
    pub const fn new(error: FetchfoxError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a displayable [`ErrorContext`].
///
/// The error chain is walked so that a [`FetchfoxError`] wrapped in
/// `anyhow` context is still recognized. The outermost message is kept as
/// details when it adds information beyond the typed error.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let outer = error.to_string();

    for cause in error.chain() {
        if let Some(fetchfox_error) = cause.downcast_ref::<FetchfoxError>() {
            let context = create_error_context(fetchfox_error);
            let typed = fetchfox_error.to_string();
            if outer != typed && context.details.is_none() {
                return context.with_details(outer);
            }
            return context;
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::new(FetchfoxError::Other {
                message: outer,
            })
            .with_suggestion("Check ownership of ~/.local/share and the install directory");
        }
    }

    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(FetchfoxError::Other {
        message: outer,
    });
    if chain.is_empty() {
        context
    } else {
        context.with_details(chain.join(": "))
    }
}

fn create_error_context(error: &FetchfoxError) -> ErrorContext {
    let context = ErrorContext::new(error.clone());
    match error {
        FetchfoxError::UnsupportedRelease {
            ..
        } => context.with_suggestion("Use one of: stable, dev, devedition, esr, nightly"),
        FetchfoxError::UnsupportedArchitecture {
            ..
        } => context.with_suggestion("Use `linux` for i686 or `linux64` for x86_64"),
        FetchfoxError::ManifestParse {
            path,
            ..
        }
        | FetchfoxError::ManifestKeyMissing {
            path,
            ..
        } => context
            .with_suggestion(format!(
                "Remove {} and run the install again",
                damaged_install_dir(path).display()
            ))
            .with_details("The existing installation looks corrupted"),
        FetchfoxError::Network {
            ..
        }
        | FetchfoxError::HttpStatus {
            ..
        } => context.with_suggestion(
            "Check your internet connection, or the --pin / --locale values if the archive was not found",
        ),
        FetchfoxError::RemoteVersionParse {
            ..
        }
        | FetchfoxError::RemoteVersionMissing {
            ..
        } => context.with_suggestion("Use --pin <version> to install a specific version"),
        FetchfoxError::ArchiveExtract {
            ..
        } => context
            .with_suggestion("Re-run the install; the previous installation has already been removed"),
        FetchfoxError::HomeDirNotFound => {
            context.with_suggestion("Set the HOME environment variable")
        }
        FetchfoxError::ConfigError {
            ..
        } => context.with_suggestion("Check the syntax of ~/.config/fetchfox/config.toml"),
        FetchfoxError::Other {
            ..
        } => context,
    }
}

/// Install directory owning the manifest at `manifest_path` (`<dir>/firefox/platform.ini`).
fn damaged_install_dir(manifest_path: &str) -> &Path {
    let path = Path::new(manifest_path);
    path.parent().and_then(Path::parent).unwrap_or(path)
}
