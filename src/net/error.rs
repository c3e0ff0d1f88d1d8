//! Error taxonomy for backend calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is scoped to the call that produced it. Services log and
//! re-raise these values unchanged; nothing here is fatal to the process.

/// Errors produced by the HTTP adapter and resource services.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("network request failed: {0}")]
    Transport(String),

    /// The request exceeded its time budget.
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The caller cancelled the request before it completed.
    #[error("request cancelled")]
    Cancelled,

    /// The backend rejected the bearer token (401).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backend refused the action for this user (403).
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// The addressed resource does not exist (404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Any other 4xx, typically validation.
    #[error("request rejected: status {status}: {message}")]
    Client { status: u16, message: String },

    /// 5xx from the backend.
    #[error("server error: status {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected schema.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The outgoing request could not be constructed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Classify a non-success status with the backend's error message.
    #[must_use]
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            500..=599 => Self::Server { status, message },
            _ => Self::Client { status, message },
        }
    }

    /// HTTP status carried by this error, if the backend answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::Client { status, .. } | Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Timeout(_) => "E_TIMEOUT",
            Self::Cancelled => "E_CANCELLED",
            Self::Unauthorized { .. } => "E_UNAUTHORIZED",
            Self::Forbidden { .. } => "E_FORBIDDEN",
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::Client { .. } => "E_CLIENT",
            Self::Server { .. } => "E_SERVER",
            Self::MalformedResponse(_) => "E_MALFORMED_RESPONSE",
            Self::InvalidRequest(_) => "E_INVALID_REQUEST",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether a caller could reasonably try again. The library never does.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_) | Self::Server { .. })
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
