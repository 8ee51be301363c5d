use thiserror::Error;

/// Result type alias for larascan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that can occur while scanning a target
#[derive(Error, Debug)]
pub enum ScanError {
    /// The concurrency limit handed to the orchestrator was not positive
    #[error("invalid concurrency: {0} (must be greater than 0)")]
    InvalidConcurrency(usize),

    /// The scan target was empty or unusable
    #[error("invalid target: {0:?}")]
    InvalidTarget(String),

    /// HTTP request could not be completed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    /// Response headers arrived but the body could not be read
    #[error("failed to read response body (status {status}): {message}")]
    Body {
        /// HTTP status of the response whose body failed
        status: u16,
        /// Underlying read error
        message: String,
    },

    /// A request header name or value was rejected
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// DNS resolution failed
    #[error("DNS resolution failed: {0}")]
    Dns(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ScanError {
    /// Returns true if the error happened before any HTTP response was obtained
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Timeout(_) | Self::Dns(_))
    }

    /// Returns the HTTP status code carried by the error, if any
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Body { status, .. } => Some(*status),
            _ => None,
        }
    }
}
