//! Error types for the Tekhub clients

use thiserror::Error;

use tekhub_core::error::{RecordError, ValidationError};

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the Hub or the dashboard
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Response parsed but describes an invalid record
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] RecordError),

    /// Request rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// Authenticated endpoint called without a stored token
    #[error("Not logged in")]
    NotAuthenticated,

    /// Credential store could not be read or written
    #[error("Credential store error: {0}")]
    Credentials(#[from] std::io::Error),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Text shown after "error returned was :" in notifications
    ///
    /// The server's own message for API errors, the error description
    /// otherwise.
    pub fn server_text(&self) -> String {
        match self {
            Self::ApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// No token was stored, or the Hub rejected it
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::ApiError { status: 401, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        let not_found = ClientError::api_error(404, "no such resource");
        assert!(not_found.is_not_found());
        assert!(not_found.is_client_error());
        assert!(!not_found.is_server_error());

        let unavailable = ClientError::api_error(503, "Service Unavailable");
        assert!(unavailable.is_server_error());
        assert!(!unavailable.is_client_error());

        assert!(ClientError::api_error(401, "token expired").is_unauthorized());
        assert!(ClientError::NotAuthenticated.is_unauthorized());
        assert!(!not_found.is_unauthorized());
    }

    #[test]
    fn test_server_text() {
        assert_eq!(
            ClientError::api_error(400, "webhook already exists").server_text(),
            "webhook already exists"
        );
        assert_eq!(ClientError::NotAuthenticated.server_text(), "Not logged in");
    }
}
