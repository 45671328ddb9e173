use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when retrieving a repository file
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// No complete response within the configured timeout
    #[error("Timed out after {timeout_ms}ms retrieving \"{url}\"")]
    Timeout { url: String, timeout_ms: u64 },

    /// The fetch was aborted because its owner shut down
    #[error("Request for \"{url}\" was cancelled")]
    Cancelled { url: String },

    /// Connection, TLS or body read failure
    #[error("Network error retrieving \"{url}\": {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status
    #[error("HTTP error retrieving {url}, status: {status}")]
    HttpStatus { url: String, status: StatusCode },

    /// Upstream answered successfully but the body holds no usable data
    #[error("Cannot download \"{url}\": {reason}")]
    InvalidPayload { url: String, reason: String },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Result alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Returns true for failures caused by an unreachable or slow upstream
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Cancelled { .. } | Self::Network { .. }
        )
    }

    /// URL of the request that failed, if the error belongs to one
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Timeout { url, .. }
            | Self::Cancelled { url }
            | Self::Network { url, .. }
            | Self::HttpStatus { url, .. }
            | Self::InvalidPayload { url, .. } => Some(url),
            Self::Client(_) => None,
        }
    }

    /// HTTP status for upstream rejections
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}
