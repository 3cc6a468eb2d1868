//! menuqa error types

use std::time::Duration;

/// menuqa error types
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    // Caller errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Completion backend errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("empty response from model")]
    EmptyResponse,

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl MenuError {
    /// Whether a retry of the same completion request might succeed.
    ///
    /// Network failures, rate limiting, timeouts and server-side (5xx)
    /// errors are transient; everything else is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            MenuError::Http(_) | MenuError::RateLimited { .. } | MenuError::Timeout(_) => true,
            MenuError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Provider-supplied backoff hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            MenuError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for menuqa operations
pub type Result<T> = std::result::Result<T, MenuError>;
