//! Request transport abstraction and implementations
//!
//! This module defines the [`Transport`] trait every request transport
//! satisfies. Concrete implementations live in submodules:
//!
//! - [`http::HttpTransport`] -- reqwest-backed transport talking to the
//!   dashboard backend.
//! - [`fake::FakeTransport`] -- in-process scripted transport used in tests.
//!
//! # Design
//!
//! A transport only moves JSON: it prefixes the base URL, performs the call,
//! and hands back the status and parsed body. Envelope handling is left to
//! [`RequestClient`](crate::api::RequestClient) so that unwrapping happens
//! in exactly one place.

use std::fmt;

use serde_json::Value;

use crate::error::Result;

pub mod fake;
pub mod http;

/// HTTP verbs the dashboard backend is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `PUT`
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Put => write!(f, "PUT"),
        }
    }
}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body (`Value::Null` for an empty body)
    pub body: Value,
}

impl TransportResponse {
    /// Build a response
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Whether the status is in `200..=299`
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over request transports.
///
/// Used polymorphically through `Arc<dyn Transport>` by
/// [`RequestClient`](crate::api::RequestClient).
#[async_trait::async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Issue a GET for `path` with the given query pairs.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DashError::Transport`] if no response could
    /// be obtained. Non-2xx statuses are NOT errors at this layer.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<TransportResponse>;

    /// Issue a PUT for `path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::DashError::Transport`] if no response could
    /// be obtained. Non-2xx statuses are NOT errors at this layer.
    async fn put(&self, path: &str, body: Value) -> Result<TransportResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Put.to_string(), "PUT");
    }

    #[test]
    fn test_transport_response_success_range() {
        assert!(TransportResponse::new(200, json!({})).is_success());
        assert!(TransportResponse::new(204, Value::Null).is_success());
        assert!(!TransportResponse::new(302, Value::Null).is_success());
        assert!(!TransportResponse::new(404, Value::Null).is_success());
    }
}
