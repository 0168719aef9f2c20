//! Download progress display.
//!
//! A thin wrapper over `indicatif` so the transport does not have to care
//! whether progress output is wanted. A hidden bar accepts the same calls
//! and draws nothing.

use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};

/// Byte-counting progress bar for a single download.
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Create a download bar. `total` is the expected size when the server sent one.
    #[must_use]
    pub fn download(total: Option<u64>, enabled: bool) -> Self {
        let inner = if !enabled {
            IndicatifBar::hidden()
        } else if let Some(total) = total {
            let bar = IndicatifBar::new(total);
            bar.set_style(download_style());
            bar
        } else {
            let bar = IndicatifBar::new_spinner();
            bar.set_style(unknown_length_style());
            bar
        };
        Self {
            inner,
        }
    }

    /// Advance by `delta` bytes.
    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    /// Bytes counted so far.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    /// Finish and leave the bar on screen.
    pub fn finish(&self) {
        self.inner.finish();
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}

fn unknown_length_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {bytes} ({bytes_per_sec})")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
}
