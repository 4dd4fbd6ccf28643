//! Error taxonomy for the chat core.
//!
//! Three failure classes cross the API boundary: bad input caught before
//! any request is issued (`Validation`), transport problems (`Network`),
//! and non-2xx responses carrying a server message (`Api`).
//!
//! A concurrently in-flight page fetch is NOT an error. The pagination
//! guard reports it as a skip signal (`begin_fetch` returning `false`),
//! so no variant exists for it here.

use thiserror::Error;

/// Errors produced by the chat API client and controller.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Input rejected before any request was issued.
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (connection, timeout, malformed body).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl ChatError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        ChatError::Validation(message.into())
    }

    /// The message stored on session state when this error surfaces there.
    ///
    /// Session-level errors are plain strings (they outlive the error
    /// value and get rendered verbatim).
    pub fn session_message(&self) -> String {
        match self {
            ChatError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_session_message_uses_server_text() {
        let err = ChatError::Api {
            status: 500,
            message: "session not found".to_string(),
        };
        assert_eq!(err.session_message(), "session not found");
    }

    #[test]
    fn test_validation_display_is_bare_message() {
        let err = ChatError::validation("Session ID is required.");
        assert_eq!(err.to_string(), "Session ID is required.");
        assert_eq!(err.session_message(), "Session ID is required.");
    }
}
