use std::path::Path;

use futures_util::StreamExt;
use reqwest::Client;
use sha1::{Digest, Sha1};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::core::error::{FetchError, FetchResult};
use crate::core::retry::{Attempt, RetryPolicy};

/// A single file to download with optional SHA-1 for validation.
#[derive(Debug, Clone, Copy)]
pub struct DownloadEntry<'a> {
    pub url: &'a str,
    pub dest: &'a Path,
    pub sha1: Option<&'a str>,
}

/// Streaming, SHA-1 validated downloader with bounded retry.
pub struct Downloader {
    client: Client,
    retry: RetryPolicy,
}

impl Downloader {
    pub fn new(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Download `entry.url` to `entry.dest`, returning the number of bytes
    /// written.
    ///
    /// Creates parent directories as needed. If every attempt fails, the
    /// partially written file is removed before the error is returned.
    pub async fn download_file(&self, entry: DownloadEntry<'_>) -> FetchResult<u64> {
        if let Some(parent) = entry.dest.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FetchError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let result = self
            .retry
            .run(entry.url, |_| async move {
                Attempt::from(self.download_once(entry).await)
            })
            .await;

        match result {
            Ok(bytes) => {
                debug!("Downloaded: {} -> {:?} ({} bytes)", entry.url, entry.dest, bytes);
                Ok(bytes)
            }
            Err(e) => {
                remove_partial(entry.dest).await;
                Err(e)
            }
        }
    }

    async fn download_once(&self, entry: DownloadEntry<'_>) -> FetchResult<u64> {
        let response = self.client.get(entry.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: entry.url.to_string(),
                status: status.as_u16(),
            });
        }

        let io_err = |source: std::io::Error| FetchError::Io {
            path: entry.dest.to_path_buf(),
            source,
        };

        let mut hasher = Sha1::new();
        let mut written = 0u64;

        // Scope the handle so it is closed before any cleanup.
        {
            let mut file = tokio::fs::File::create(entry.dest).await.map_err(io_err)?;
            let mut body = response.bytes_stream();
            while let Some(chunk) = body.next().await {
                let chunk = chunk?;
                hasher.update(&chunk);
                file.write_all(&chunk).await.map_err(io_err)?;
                written += chunk.len() as u64;
            }
            file.flush().await.map_err(io_err)?;
        }

        if let Some(expected) = entry.sha1 {
            let actual = hex::encode(hasher.finalize());
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(FetchError::Sha1Mismatch {
                    path: entry.dest.to_path_buf(),
                    expected: expected.to_string(),
                    actual,
                });
            }
        }

        Ok(written)
    }
}

async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("Removed partial download {:?}", path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove partial download {:?}: {}", path, e),
    }
}
