//! Network transport.
//!
//! [`Transport`] is the seam between the installer and the network: one call
//! fetching a whole response body, one streaming a response into a file.
//! [`HttpTransport`] implements it with `reqwest`. Requests are never retried
//! and no timeout is configured beyond the client defaults.
//!
//! `file://` URLs are served from the local file system, which makes a local
//! mirror of the distribution server usable without an HTTP server.

use crate::constants::USER_AGENT;
use crate::core::FetchfoxError;
use crate::utils::ProgressBar;
use anyhow::{Context, Result};
use reqwest::{Client, Response, Url};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Fetches remote resources.
pub trait Transport {
    /// Fetch `url` and return the full response body.
    fn get_bytes(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;

    /// Stream `url` into a newly created file at `dest`, returning the byte count.
    fn download_to_file(&self, url: &str, dest: &Path) -> impl Future<Output = Result<u64>> + Send;
}

/// `reqwest`-backed [`Transport`] with an optional download progress bar.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    show_progress: bool,
}

impl HttpTransport {
    /// Build a client with the Fetchfox user agent. Progress output is on.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            show_progress: true,
        })
    }

    /// Enable or disable the download progress bar.
    #[must_use]
    pub fn show_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    async fn send(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(|e| network_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchfoxError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }
        Ok(response)
    }
}

impl Transport for HttpTransport {
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        if let Some(path) = local_path(url) {
            return tokio::fs::read(&path).await.map_err(|e| {
                FetchfoxError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
                .into()
            });
        }

        let response = self.send(url).await?;
        let body = response.bytes().await.map_err(|e| network_error(url, &e))?;
        Ok(body.to_vec())
    }

    async fn download_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        if let Some(path) = local_path(url) {
            return tokio::fs::copy(&path, dest).await.map_err(|e| {
                FetchfoxError::Network {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
                .into()
            });
        }

        let mut response = self.send(url).await?;
        let progress = ProgressBar::download(response.content_length(), self.show_progress);

        let mut file = tokio::fs::File::create(dest)
            .await
            .with_context(|| format!("Failed to create {}", dest.display()))?;

        while let Some(chunk) = response.chunk().await.map_err(|e| network_error(url, &e))? {
            file.write_all(&chunk)
                .await
                .with_context(|| format!("Failed to write {}", dest.display()))?;
            progress.inc(chunk.len() as u64);
        }
        file.flush().await.with_context(|| format!("Failed to write {}", dest.display()))?;
        progress.finish();

        let written = progress.position();
        debug!("Downloaded {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

fn network_error(url: &str, error: &reqwest::Error) -> anyhow::Error {
    FetchfoxError::Network {
        url: url.to_string(),
        reason: error.to_string(),
    }
    .into()
}

fn local_path(url: &str) -> Option<PathBuf> {
    let parsed = Url::parse(url).ok()?;
    if parsed.scheme() != "file" {
        return None;
    }
    parsed.to_file_path().ok()
}
