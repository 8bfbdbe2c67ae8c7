use std::path::PathBuf;
use thiserror::Error;

use crate::persistence::StoreError;
use crate::remote::UrlBuildError;

/// Central error type for the launcher backend.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Storage ─────────────────────────────────────────
    #[error("persisted store error: {0}")]
    Store(#[from] StoreError),

    /// The configuration/account storage location cannot be used at all.
    /// Unlike a corrupt store, this aborts bootstrap.
    #[error("data directory unavailable: {0:?}")]
    DataDirUnavailable(PathBuf),

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Remote URLs ─────────────────────────────────────
    #[error("URL build error: {0}")]
    UrlBuild(#[from] UrlBuildError),

    // ── Bootstrap ───────────────────────────────────────
    /// Bootstrap reached READY earlier in this process; the sequence
    /// is one-shot.
    #[error("bootstrap already completed in this process")]
    AlreadyBootstrapped,

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
