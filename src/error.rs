use thiserror::Error;

/// Message used when the protocol layer supplies no diagnostic text.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Error type for pgexec operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// The session could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection is fine but the statement did not execute successfully.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl ConnectionError {
    pub(crate) fn connection_failed(message: Option<String>) -> Self {
        ConnectionError::ConnectionFailed(diagnostic(message))
    }

    pub(crate) fn invalid_query(message: Option<String>) -> Self {
        ConnectionError::InvalidQuery(diagnostic(message))
    }

    /// Returns the diagnostic carried by this error.
    pub fn message(&self) -> &str {
        match self {
            ConnectionError::ConnectionFailed(message) | ConnectionError::InvalidQuery(message) => {
                message
            }
        }
    }
}

/// Normalizes a protocol diagnostic, masking absent or blank text with [`UNKNOWN_ERROR`].
pub(crate) fn diagnostic(message: Option<String>) -> String {
    match message {
        Some(message) => {
            let trimmed = message.trim_end();
            if trimmed.trim_start().is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                trimmed.to_string()
            }
        }
        None => UNKNOWN_ERROR.to_string(),
    }
}

/// Result type alias for pgexec operations
pub type Result<T> = std::result::Result<T, ConnectionError>;
