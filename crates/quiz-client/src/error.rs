//! Error types for the quiz API client.

use quiz_autosave::SaveError;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur talking to the quiz server.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, parsed as JSON when possible.
        body: Value,
    },

    /// Invalid client configuration.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Returns a user-friendly error message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the quiz server. Please check your connection.",
            Self::Status { status: 403, .. } => "You are not logged in or your session expired.",
            Self::Status {
                status: 404 | 410, ..
            } => "The quiz is over or no longer available.",
            Self::Status { .. } => "The quiz server rejected the answer.",
            Self::InvalidConfig(_) => "The quiz server address is not valid.",
        }
    }

    /// Returns whether retrying the same request might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidConfig(_) => false,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<ClientError> for SaveError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status, body } => SaveError::status(status, body),
            other => SaveError::transport(other.to_string()),
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_messages() {
        let err = ClientError::Network("connection refused".to_string());
        assert!(err.user_message().contains("connection"));

        let err = ClientError::Status {
            status: 410,
            body: json!({}),
        };
        assert!(err.user_message().contains("quiz is over"));
    }

    #[test]
    fn test_retryable() {
        assert!(ClientError::Network("timeout".to_string()).is_retryable());
        assert!(
            ClientError::Status {
                status: 503,
                body: Value::Null
            }
            .is_retryable()
        );
        assert!(
            !ClientError::Status {
                status: 410,
                body: Value::Null
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_into_save_error() {
        let err: SaveError = ClientError::Status {
            status: 410,
            body: json!({"message": "Quiz is finished"}),
        }
        .into();
        assert_eq!(err.status, Some(410));
        assert_eq!(err.server_message(), Some("Quiz is finished"));

        let err: SaveError = ClientError::Network("refused".to_string()).into();
        assert_eq!(err.status, None);
        assert_eq!(err.to_string(), "network error: refused");
    }
}
