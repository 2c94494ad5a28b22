use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the fetcher.
/// Every module returns `Result<T, FetchError>`.
#[derive(Debug, Error)]
pub enum FetchError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-1 mismatch for {path:?}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Manifest ────────────────────────────────────────
    #[error("Pack list not found: {0:?}")]
    ManifestMissing(PathBuf),

    // ── Config ──────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias used throughout the crate.
pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    /// Whether another attempt at the same request may succeed.
    ///
    /// HTTP error statuses and integrity failures are final; transport
    /// problems, timeouts, truncated bodies and local IO hiccups are not.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Http(e) => e.status().is_none(),
            FetchError::Io { .. } | FetchError::Json(_) => true,
            FetchError::Status { .. }
            | FetchError::InvalidUrl { .. }
            | FetchError::Sha1Mismatch { .. }
            | FetchError::ManifestMissing(_)
            | FetchError::Config(_) => false,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(source: std::io::Error) -> Self {
        FetchError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_errors_are_final() {
        let err = FetchError::Status {
            url: "https://api.modrinth.com/v2/project/x".into(),
            status: 404,
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn io_errors_are_retried() {
        let err: FetchError =
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset").into();
        assert!(err.is_transient());
    }
}
