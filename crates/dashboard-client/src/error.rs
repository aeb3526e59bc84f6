//! Error types for the HTTP clients

use thiserror::Error;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised while talking to the internal API or the market API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {message}")]
    Build {
        /// Error message
        message: String,
    },

    /// Request rejected locally before anything was sent
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message
        message: String,
    },

    /// Connection or transport failure
    #[error("Request to {url} failed: {message}")]
    Network {
        /// Target URL
        url: String,
        /// Error message
        message: String,
    },

    /// No response within the configured timeout
    #[error("Request to {url} timed out")]
    Timeout {
        /// Target URL
        url: String,
    },

    /// 401 or 403 from the server
    #[error("Request to {url} was not authorized (HTTP {status})")]
    Unauthorized {
        /// Target URL
        url: String,
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, if any
        message: Option<String>,
    },

    /// Any other non-success status
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        /// Target URL
        url: String,
        /// HTTP status code
        status: u16,
        /// `message` field of the error body, if any
        message: Option<String>,
    },

    /// Body could not be decoded into the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode {
        /// Target URL
        url: String,
        /// Error message
        message: String,
    },
}

impl ClientError {
    /// Whether the server rejected the credential
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// HTTP status, when the server answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message supplied by the server in its error body
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. } | Self::Status { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub(crate) fn from_reqwest(url: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if err.is_decode() {
            Self::Decode {
                url: url.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Network {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl From<dashboard_core::Error> for ClientError {
    fn from(err: dashboard_core::Error) -> Self {
        Self::InvalidRequest {
            message: err.to_string(),
        }
    }
}

impl From<ClientError> for dashboard_core::Error {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Unauthorized { .. } => Self::Authentication(err.to_string()),
            ClientError::InvalidRequest { message } => Self::Validation {
                field: "request".to_string(),
                message,
            },
            ClientError::Build { message } => Self::Configuration { message },
            other => Self::upstream("http", other.to_string()),
        }
    }
}
