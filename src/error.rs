//! Error types for datadash
//!
//! This module defines all error types used throughout the crate,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for datadash operations
///
/// Covers configuration problems, transport failures, non-success
/// responses from the backend, store validation, and persistence.
#[derive(Error, Debug)]
pub enum DashError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced a usable response (connection refused,
    /// timeout, undecodable body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx HTTP status
    #[error("Request failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message from the envelope, or the raw body
        message: String,
    },

    /// The backend answered 2xx but the envelope reported `success = false`
    #[error("Request rejected (code {code}): {message}")]
    Envelope {
        /// Envelope classification code
        code: i64,
        /// Envelope message, possibly empty
        message: String,
    },

    /// Theme name outside `light`, `dark`, `system`
    #[error("Invalid theme: {0}. Must be one of: light, dark, system")]
    InvalidTheme(String),

    /// Durable storage errors (session repository)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl DashError {
    /// HTTP status carried by this error, if any
    ///
    /// # Examples
    ///
    /// ```
    /// use datadash::error::DashError;
    ///
    /// let err = DashError::Status { status: 404, message: "not found".into() };
    /// assert_eq!(err.status(), Some(404));
    /// assert_eq!(DashError::Config("x".into()).status(), None);
    /// ```
    pub fn status(&self) -> Option<u16> {
        match self {
            DashError::Status { status, .. } => Some(*status),
            DashError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for datadash operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation. Callers that
/// need a specific variant use `err.downcast_ref::<DashError>()`.
pub type Result<T> = anyhow::Result<T>;
