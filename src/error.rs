//! Error types for the crawling toolkit

use thiserror::Error;

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or extracting
#[derive(Error, Debug)]
pub enum Error {
    /// The reachability pre-check returned an error-range status.
    /// No browser session was started.
    #[error("Address not reachable (status {status}): {url}")]
    NotReachable { url: String, status: u16 },

    /// The address failed URL validation before any network activity
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Selector and field-name lists disagree, or no selectors were supplied
    #[error("Extraction spec mismatch: {0}")]
    SpecMismatch(String),

    /// Failed to start the browser backend
    #[error("Renderer initialization failed: {0}")]
    InitializationError(String),

    /// Failed to fetch or navigate to a page
    #[error("Failed to load page: {0}")]
    LoadError(String),

    /// Failed to read the rendered document out of the session
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// Reading or writing a flat-file artifact failed
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A partitioned worker exited without producing its artifact
    #[error("Worker for partition {0} did not complete")]
    WorkerFailed(usize),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::StorageError(err.to_string())
    }
}

#[cfg(feature = "browser")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::RenderError(err.to_string())
    }
}
