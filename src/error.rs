// src/error.rs

//! Unified error handling for the client library.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
///
/// The pipeline variants display exactly the user-facing message that was
/// surfaced through the notifier, so callers can show `to_string()` as-is.
#[derive(Error, Debug)]
pub enum AppError {
    /// Response body was not a JSON object
    #[error("{0}")]
    MalformedResponse(String),

    /// Envelope carried a non-success code
    #[error("{message}")]
    Business { code: String, message: String },

    /// Envelope carried the session-expired code
    #[error("{message}")]
    SessionExpired { message: String },

    /// Server answered with an HTTP error status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Request was sent but no response arrived
    #[error("{0}")]
    Network(String),

    /// Request could not be built or sent
    #[error("{0}")]
    Request(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client setup failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// The message shown to the user, for errors raised by the request pipeline.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Self::MalformedResponse(message)
            | Self::Network(message)
            | Self::Request(message) => Some(message.as_str()),
            Self::Business { message, .. }
            | Self::SessionExpired { message }
            | Self::Status { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether this error ended the current login session.
    pub fn is_session_end(&self) -> bool {
        matches!(
            self,
            Self::SessionExpired { .. } | Self::Status { status: 401, .. }
        )
    }
}
