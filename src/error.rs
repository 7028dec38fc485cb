use std::io;
use thiserror::Error;

/// Failure raised by a [`RemoteStore`](crate::store::RemoteStore)
/// implementation. The core never retries; one of these terminates the
/// single operation that triggered the call.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
    #[error("permission denied at '{path}': {reason}")]
    Denied { path: String, reason: String },
    #[error("backend error: {0}")]
    Backend(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum LiveTreeError {
    #[error("remote operation failed: {0}")]
    Remote(#[from] RemoteError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid path segment '{0}': segments must be non-empty and free of / . $ # [ ] and control characters")]
    InvalidSegment(String),
    #[error("container has no bound path; writes cannot propagate")]
    Unbound,
    #[error("expected a mapping at '{path}', found {found}")]
    NotAMap { path: String, found: &'static str },
    #[error("config error: {0}")]
    Config(String),
}
