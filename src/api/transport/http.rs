//! reqwest-backed request transport
//!
//! [`HttpTransport`] appends each request path verbatim to the configured
//! base URL, attaches the default headers (including an optional bearer
//! token), and returns the status with the parsed JSON body.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;

use crate::api::transport::{Transport, TransportResponse};
use crate::config::ApiConfig;
use crate::error::{DashError, Result};

/// HTTP transport for the dashboard backend.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use url::Url;
/// use datadash::api::transport::http::HttpTransport;
///
/// let transport = HttpTransport::new(
///     Url::parse("http://localhost:3000/api").unwrap(),
///     None,
///     Duration::from_secs(30),
/// )
/// .unwrap();
/// ```
#[derive(Debug)]
pub struct HttpTransport {
    /// Underlying reqwest HTTP client.
    http_client: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
}

impl HttpTransport {
    /// Construct a new [`HttpTransport`] targeting `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Absolute base URL every path is appended to.
    /// * `token` - Optional bearer token sent with every request.
    /// * `timeout` - Per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns `DashError::Config` if the token is not a valid header value
    /// or the client cannot be built.
    pub fn new(base_url: url::Url, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| DashError::Config(format!("Invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| DashError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Construct from the `api` configuration section.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::new`].
    pub fn from_config(base_url: url::Url, api: &ApiConfig) -> Result<Self> {
        Self::new(
            base_url,
            api.token.as_deref(),
            Duration::from_secs(api.timeout_seconds),
        )
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn into_transport_response(response: reqwest::Response) -> Result<TransportResponse> {
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            DashError::Transport(format!("Failed to read response body: {}", e))
        })?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                // Error pages are often HTML; keep them so the status error has a message.
                Err(_) if !(200..300).contains(&status) => Value::String(text),
                Err(e) => {
                    return Err(DashError::Transport(format!(
                        "Response body is not valid JSON: {}",
                        e
                    ))
                    .into())
                }
            }
        };

        Ok(TransportResponse::new(status, body))
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<TransportResponse> {
        let url = self.url_for(path);
        tracing::debug!(url = %url, "GET");

        let response = self
            .http_client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("GET {} failed: {}", url, e);
                DashError::Transport(format!("GET {} failed: {}", url, e))
            })?;

        Self::into_transport_response(response).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<TransportResponse> {
        let url = self.url_for(path);
        tracing::debug!(url = %url, "PUT");

        let response = self
            .http_client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("PUT {} failed: {}", url, e);
                DashError::Transport(format!("PUT {} failed: {}", url, e))
            })?;

        Self::into_transport_response(response).await
    }
}
