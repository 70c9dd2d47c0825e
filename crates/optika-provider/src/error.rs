use thiserror::Error;

/// Centralized error type for provider calls.
#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP {status} for URL: {url}")]
    Status {
        status: u16,
        url: String,
        body: Option<String>,
    },

    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Request failed after {max_retries} retries: {source}")]
    RetryExhausted {
        max_retries: u32,
        source: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Creates an HTTP status error.
    pub fn status(status: u16, url: String, body: Option<String>) -> Self {
        Self::Status { status, url, body }
    }

    /// Checks if this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Unavailable(_) => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429 || *status == 408,
            Self::Http(_) | Self::InvalidResponse(_) | Self::RetryExhausted { .. } => false,
        }
    }

    /// Checks if this error indicates a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Gets the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Unavailable(error.to_string())
        } else {
            Self::Http(error.to_string())
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
