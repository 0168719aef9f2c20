//! Desktop launcher rendering.
//!
//! The launcher is fully owned by Fetchfox: it is re-rendered from
//! [`DESKTOP_ENTRY_TEMPLATE`] and overwritten on every install.

use crate::config::Layout;
use crate::core::InstallTarget;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tera::{Context as TeraContext, Tera};

/// Template of the `.desktop` file.
pub const DESKTOP_ENTRY_TEMPLATE: &str = "# Managed by Fetchfox - do not edit.
[Desktop Entry]
Name=Firefox {{suffix}}
Comment=Browse the World Wide Web (Fetchfox)
GenericName=Web Browser (Fetchfox)
X-GNOME-FullName=Firefox Web Browser{{suffix}}
Exec={{executable}} --class {{instance_class}} %u
Terminal=false
X-MultipleArgs=false
Type=Application
Icon=firefox
Categories=Network;WebBrowser;
MimeType=text/html;text/xml;application/xhtml+xml;application/xml;application/vnd.mozilla.xul+xml;application/rss+xml;application/rdf+xml;image/gif;image/jpeg;image/png;x-scheme-handler/http;x-scheme-handler/https;
StartupWMClass={{instance_class}}
StartupNotify=true
";

/// Values substituted into [`DESKTOP_ENTRY_TEMPLATE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesktopEntry {
    /// Absolute path of the installed browser executable
    pub executable: PathBuf,
    /// Window class, `Fetchfox-<release>-<arch>-<locale>`
    pub instance_class: String,
    /// Channel display suffix, leading space included
    pub suffix: String,
}

impl DesktopEntry {
    /// The launcher for `target` installed under `layout`.
    #[must_use]
    pub fn for_target(layout: &Layout, target: &InstallTarget) -> Self {
        Self {
            executable: layout.executable_path(target),
            instance_class: target.instance_class(),
            suffix: target.channel.name_suffix().to_string(),
        }
    }
}

/// Render the launcher text. Values are inserted verbatim, nothing is escaped.
pub fn render_desktop_entry(entry: &DesktopEntry) -> Result<String> {
    let context = TeraContext::from_serialize(entry).context("Failed to build launcher context")?;
    Tera::one_off(DESKTOP_ENTRY_TEMPLATE, &context, false).context("Failed to render launcher")
}
