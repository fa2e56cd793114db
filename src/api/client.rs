//! Typed request client
//!
//! [`RequestClient`] sits on top of a [`Transport`] and is the single place
//! where response envelopes are unwrapped. Callers always receive the
//! payload type they asked for, or an error:
//!
//! - non-2xx status -> [`DashError::Status`]
//! - 2xx with `success = false` -> [`DashError::Envelope`]
//! - 2xx with `success = true` -> `data` deserialized into `T`

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::envelope::ApiResponse;
use crate::api::transport::{Method, Transport, TransportResponse};
use crate::error::{DashError, Result};

/// Typed façade over a [`Transport`].
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Debug, Clone)]
pub struct RequestClient {
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    /// Wrap a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// GET `path` and unwrap the envelope into `T`
    ///
    /// # Errors
    ///
    /// Propagates transport failures unchanged; see the module docs for the
    /// status and envelope errors.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// GET `path` with query pairs and unwrap the envelope into `T`
    ///
    /// # Errors
    ///
    /// See [`RequestClient::get`].
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let response = self.transport.get(path, query).await?;
        unwrap_response(Method::Get, path, response)
    }

    /// PUT `body` to `path` and unwrap the envelope into `T`
    ///
    /// # Errors
    ///
    /// See [`RequestClient::get`]. Also fails if `body` cannot be serialized.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.transport.put(path, body).await?;
        unwrap_response(Method::Put, path, response)
    }
}

fn unwrap_response<T: DeserializeOwned>(
    method: Method,
    path: &str,
    response: TransportResponse,
) -> Result<T> {
    if !response.is_success() {
        let message = status_message(&response.body);
        tracing::warn!(
            status = response.status,
            "{} {} failed: {}",
            method,
            path,
            message
        );
        return Err(DashError::Status {
            status: response.status,
            message,
        }
        .into());
    }

    let envelope: ApiResponse<Value> = serde_json::from_value(response.body).map_err(|e| {
        DashError::Transport(format!(
            "{} {} returned a body that is not a response envelope: {}",
            method, path, e
        ))
    })?;

    let data = envelope.into_result().map_err(|e| {
        tracing::warn!("{} {} rejected: {}", method, path, e);
        e
    })?;

    serde_json::from_value(data.unwrap_or(Value::Null)).map_err(|e| {
        DashError::Transport(format!(
            "{} {} returned an unexpected payload: {}",
            method, path, e
        ))
        .into()
    })
}

/// Best-effort message for a non-2xx body: the envelope message when the
/// body is one, otherwise the body text.
fn status_message(body: &Value) -> String {
    match body {
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use serde_json::json;

    fn client_with(fake: FakeTransport) -> (RequestClient, Arc<FakeTransport>) {
        let fake = Arc::new(fake);
        (RequestClient::new(fake.clone()), fake)
    }

    #[tokio::test]
    async fn test_get_unwraps_data() {
        let fake = FakeTransport::new();
        fake.respond_ok(Method::Get, "/numbers", json!([1, 2, 3]));
        let (client, _) = client_with(fake);

        let numbers: Vec<u32> = client.get("/numbers").await.unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_non_2xx_is_status_error_with_envelope_message() {
        let fake = FakeTransport::new();
        fake.respond_error(Method::Get, "/api/dataset/7", 404, "dataset not found");
        let (client, _) = client_with(fake);

        let err = client.get::<Value>("/api/dataset/7").await.unwrap_err();
        match err.downcast_ref::<DashError>() {
            Some(DashError::Status { status, message }) => {
                assert_eq!(*status, 404);
                assert_eq!(message, "dataset not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_2xx_plain_text_body_kept_as_message() {
        let fake = FakeTransport::new();
        fake.respond(
            Method::Get,
            "/user/me",
            502,
            Value::String("Bad Gateway".to_string()),
        );
        let (client, _) = client_with(fake);

        let err = client.get::<Value>("/user/me").await.unwrap_err();
        assert!(err.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_2xx_with_failed_envelope_is_envelope_error() {
        let fake = FakeTransport::new();
        fake.respond(
            Method::Get,
            "/user/me",
            200,
            json!({"code": 401, "data": null, "message": "login required", "success": false}),
        );
        let (client, _) = client_with(fake);

        let err = client.get::<Value>("/user/me").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashError>(),
            Some(DashError::Envelope { code: 401, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_data_deserializes_as_null() {
        let fake = FakeTransport::new();
        fake.respond(
            Method::Put,
            "/noop",
            200,
            json!({"code": 0, "success": true}),
        );
        let (client, _) = client_with(fake);

        let result: Option<String> = client.put("/noop", &json!({})).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_body_that_is_not_an_envelope_is_rejected() {
        let fake = FakeTransport::new();
        fake.respond(Method::Get, "/raw", 200, json!([1, 2]));
        let (client, _) = client_with(fake);

        let err = client.get::<Vec<u32>>("/raw").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashError>(),
            Some(DashError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_unchanged() {
        let fake = FakeTransport::new();
        fake.fail(Method::Get, "/user/me", "timed out");
        let (client, _) = client_with(fake);

        let err = client.get::<Value>("/user/me").await.unwrap_err();
        match err.downcast_ref::<DashError>() {
            Some(DashError::Transport(reason)) => assert_eq!(reason, "timed out"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_put_sends_serialized_body() {
        let fake = FakeTransport::new();
        fake.respond_ok(Method::Put, "/user/profile", json!({"ok": true}));
        let (client, fake) = client_with(fake);

        let _: Value = client
            .put("/user/profile", &json!({"username": "neo"}))
            .await
            .unwrap();
        assert_eq!(
            fake.requests()[0].body,
            Some(json!({"username": "neo"}))
        );
    }
}
