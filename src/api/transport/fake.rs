//! In-process fake transport for unit and integration tests
//!
//! [`FakeTransport`] answers requests from a table of scripted routes keyed
//! by `(Method, path)` and records every request it sees, so tests can
//! drive services and the application context without a network.
//!
//! Unknown routes answer `404` with a failed envelope, mirroring what the
//! backend does for missing resources.
//!
//! # Example
//!
//! ```
//! use datadash::api::transport::fake::FakeTransport;
//! use datadash::api::transport::{Method, Transport};
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let transport = FakeTransport::new();
//! transport.respond_ok(Method::Get, "/user/me", json!({"id": "u1"}));
//!
//! let response = transport.get("/user/me", &[]).await.unwrap();
//! assert_eq!(response.status, 200);
//! assert_eq!(transport.requests().len(), 1);
//! # }
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::api::transport::{Method, Transport, TransportResponse};
use crate::error::{DashError, Result};

/// One request observed by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// HTTP verb
    pub method: Method,
    /// Request path as passed by the caller
    pub path: String,
    /// Query pairs (GET only)
    pub query: Vec<(String, String)>,
    /// JSON body (PUT only)
    pub body: Option<Value>,
}

/// Scripted outcome for a route.
#[derive(Debug, Clone)]
enum Scripted {
    Respond(TransportResponse),
    Fail(String),
}

/// In-process scripted transport.
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<(Method, String), Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    /// Create a fake with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` with a raw status and body
    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.insert(
            method,
            path,
            Scripted::Respond(TransportResponse::new(status, body)),
        );
    }

    /// Answer `method path` with `200` and a successful envelope around `data`
    pub fn respond_ok(&self, method: Method, path: &str, data: Value) {
        self.respond(
            method,
            path,
            200,
            json!({"code": 200, "data": data, "message": "", "success": true}),
        );
    }

    /// Answer `method path` with `status` and a failed envelope
    pub fn respond_error(&self, method: Method, path: &str, status: u16, message: &str) {
        self.respond(
            method,
            path,
            status,
            json!({"code": status, "data": null, "message": message, "success": false}),
        );
    }

    /// Make `method path` fail before any response is produced
    pub fn fail(&self, method: Method, path: &str, reason: &str) {
        self.insert(method, path, Scripted::Fail(reason.to_string()));
    }

    /// Every request seen so far, in call order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn insert(&self, method: Method, path: &str, scripted: Scripted) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.insert((method, path.to_string()), scripted);
        }
    }

    fn answer(&self, request: RecordedRequest) -> Result<TransportResponse> {
        let key = (request.method, request.path.clone());
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }

        let scripted = self
            .routes
            .lock()
            .map_err(|_| DashError::Transport("fake transport lock poisoned".to_string()))?
            .get(&key)
            .cloned();

        match scripted {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(reason)) => Err(DashError::Transport(reason).into()),
            None => Ok(TransportResponse::new(
                404,
                json!({"code": 404, "data": null, "message": "Not Found", "success": false}),
            )),
        }
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<TransportResponse> {
        self.answer(RecordedRequest {
            method: Method::Get,
            path: path.to_string(),
            query: query.to_vec(),
            body: None,
        })
    }

    async fn put(&self, path: &str, body: Value) -> Result<TransportResponse> {
        self.answer(RecordedRequest {
            method: Method::Put,
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body),
        })
    }
}
