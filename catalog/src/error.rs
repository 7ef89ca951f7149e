//! Error types.

use thiserror::Error;

/// Fallback message when the backend gives no usable error body.
pub const GENERIC_FAILURE: &str = "Request failed";

/// The main error type for catalog operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-related error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend returned a non-success status.
    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    /// Operation requires authentication but none was provided.
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid argument passed to an API method.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Persisted state storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Create an API error from a status code and backend message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Error::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::AuthRequired => true,
            Error::Api { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// The human-readable message carried by this error.
    pub fn message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::api(404, "not found");
        assert_eq!(format!("{}", e), "API error [404]: not found");
    }

    #[test]
    fn test_auth_error() {
        assert!(Error::AuthRequired.is_auth_error());
        assert!(Error::api(401, "expired token").is_auth_error());
        assert!(Error::api(403, "forbidden").is_auth_error());
        assert!(!Error::api(500, "boom").is_auth_error());
        assert!(!Error::invalid("bad price").is_auth_error());
    }

    #[test]
    fn test_message_extraction() {
        assert_eq!(Error::api(404, "not found").message(), "not found");
        assert_eq!(
            Error::AuthRequired.message(),
            "Authentication required"
        );
    }
}
