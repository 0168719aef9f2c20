//! Global constants used throughout the Fetchfox codebase.
//!
//! Endpoints, on-disk names and permission modes that more than one module
//! needs to agree on.

/// Product-details endpoint listing the current version of every channel.
pub const DEFAULT_VERSIONS_URL: &str = "https://product-details.mozilla.org/1.0/firefox_versions.json";

/// Distribution server hosting the release archives.
pub const DEFAULT_DISTRIBUTION_URL: &str = "https://ftp.mozilla.org";

/// Locale used when none is given.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Build manifest inside an install directory, relative to it.
pub const MANIFEST_RELATIVE_PATH: &str = "firefox/platform.ini";

/// INI section of the manifest holding the version.
pub const MANIFEST_SECTION: &str = "Build";

/// INI key of the manifest holding the version.
pub const MANIFEST_VERSION_KEY: &str = "Milestone";

/// Browser executable inside an install directory, relative to it.
pub const EXECUTABLE_RELATIVE_PATH: &str = "firefox/firefox";

/// File name of the archive inside the temporary download directory.
pub const DOWNLOAD_FILE_NAME: &str = "download.tar.bz2";

/// Mode of a freshly created install directory (rwxr-xr-x).
pub const INSTALL_DIR_MODE: u32 = 0o755;

/// Tool refreshing the desktop menu database.
pub const MENU_REFRESH_COMMAND: &str = "update-desktop-database";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("fetchfox/", env!("CARGO_PKG_VERSION"));
