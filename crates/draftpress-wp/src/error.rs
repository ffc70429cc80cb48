//! Error types for draftpress publishing.
//!
//! Provides the common `Error` type and `Result<T>` alias used across the
//! publishing crates. Uses `thiserror` for derive macros.

use thiserror::Error;

/// Errors that can occur while publishing a post.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or incomplete credentials.
    #[error("Missing credentials: {0}")]
    Credentials(String),

    /// Source file or resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the WordPress API.
    #[error("WordPress API error: {status}")]
    Api {
        /// HTTP status code of the response.
        status: reqwest::StatusCode,
        /// Raw response body, reported as failure detail.
        body: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a credentials error listing the missing variable names.
    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Result type alias using draftpress's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_display() {
        let err = Error::credentials("WORDPRESS_URL");
        assert_eq!(err.to_string(), "Missing credentials: WORDPRESS_URL");
    }

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("post.md");
        assert_eq!(err.to_string(), "Not found: post.md");
    }

    #[test]
    fn test_api_error_display_carries_status() {
        let err = Error::Api {
            status: reqwest::StatusCode::FORBIDDEN,
            body: "denied".to_string(),
        };
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
