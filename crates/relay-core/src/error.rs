//! # Relay Error Types
//!
//! Typed error handling for the relay gateway.
//! All relay operations return `Result<T, RelayError>`.

use thiserror::Error;

/// Message returned when the lookup route is called without an identifier.
pub const MISSING_USER_ID: &str = "userID is required";

/// Core error type for all relay operations.
///
/// The `Display` text of each variant is what callers see in the
/// `{"error": ...}` body, so it carries no prefixes.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration errors (missing API key, invalid base URL)
    #[error("{0}")]
    Configuration(String),

    /// Client sent something the gateway will not forward
    #[error("{0}")]
    InvalidRequest(String),

    /// The outbound call could not complete (DNS, connect, timeout, body read)
    #[error("{0}")]
    Transport(String),

    /// Provider answered with a body that is not JSON where JSON was expected
    #[error("Invalid JSON response")]
    InvalidUpstreamJson,

    /// Outbound payload could not be encoded
    #[error("{0}")]
    Serialization(String),
}

impl RelayError {
    /// Shorthand for the lookup route's missing-identifier error
    pub fn missing_user_id() -> Self {
        RelayError::InvalidRequest(MISSING_USER_ID.to_string())
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Configuration(_) => 500,
            RelayError::InvalidRequest(_) => 400,
            RelayError::Transport(_) => 500,
            RelayError::InvalidUpstreamJson => 500,
            RelayError::Serialization(_) => 500,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization(err.to_string())
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
