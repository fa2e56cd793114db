//! Application context
//!
//! [`AppContext`] wires the request client, the resource services, and the
//! three stores together and hands them to consumers explicitly. It has an
//! explicit lifecycle: [`AppContext::init`] builds everything from a
//! [`Config`], [`AppContext::teardown`] cancels pending toast timers, resets
//! the UI store, and flushes session storage.

use std::sync::Arc;

use crate::api::transport::http::HttpTransport;
use crate::api::transport::Transport;
use crate::api::RequestClient;
use crate::config::Config;
use crate::error::Result;
use crate::services::{DatasetService, UserService};
use crate::store::{SessionRepository, SessionStore, SledSessionRepository, ToastQueue, UiStore};

/// Everything a dashboard consumer needs, owned in one place.
#[derive(Debug)]
pub struct AppContext {
    /// Dataset endpoints
    pub datasets: DatasetService,
    /// User endpoints
    pub users: UserService,
    /// Sidebar and theme flags
    pub ui: Arc<UiStore>,
    /// Persisted chat session
    pub session: Arc<SessionStore>,
    /// User-facing notifications
    pub toasts: Arc<ToastQueue>,
}

impl AppContext {
    /// Build a context from configuration
    ///
    /// Uses an [`HttpTransport`] against the resolved base URL and a
    /// [`SledSessionRepository`] at `storage.path` (or the platform data
    /// directory).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not resolve, the HTTP client
    /// cannot be built, or the session database cannot be opened.
    pub fn init(config: &Config) -> Result<Self> {
        let base_url = config.resolved_base_url()?;
        tracing::debug!(base_url = %base_url, "Initializing application context");

        let transport = HttpTransport::from_config(base_url, &config.api)?;
        let repo = SledSessionRepository::open(config.storage.path.as_deref())?;

        Ok(Self::with_parts(Arc::new(transport), Arc::new(repo)))
    }

    /// Build a context from an explicit transport and session repository
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        repo: Arc<dyn SessionRepository>,
    ) -> Self {
        let client = RequestClient::new(transport);
        Self {
            datasets: DatasetService::new(client.clone()),
            users: UserService::new(client),
            ui: Arc::new(UiStore::new()),
            session: Arc::new(SessionStore::new(repo)),
            toasts: Arc::new(ToastQueue::new()),
        }
    }

    /// Surface a failure as an error toast, passing the result through
    ///
    /// Successful results are returned untouched. Errors are returned
    /// unchanged after an [`Error`](crate::store::ToastKind::Error) toast
    /// carrying their message has been shown.
    pub fn report<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            self.toasts.error(e.to_string());
        }
        result
    }

    /// Release resources held by the context
    ///
    /// # Errors
    ///
    /// Returns the session repository's flush error.
    pub fn teardown(self) -> Result<()> {
        tracing::debug!("Tearing down application context");
        self.toasts.clear();
        self.ui.reset();
        self.session.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::fake::FakeTransport;
    use crate::api::transport::Method;
    use crate::error::DashError;
    use crate::store::{MemorySessionRepository, Theme, ToastKind};
    use serde_json::json;

    fn context() -> (AppContext, Arc<FakeTransport>, Arc<MemorySessionRepository>) {
        let fake = Arc::new(FakeTransport::new());
        let repo = Arc::new(MemorySessionRepository::new());
        let ctx = AppContext::with_parts(fake.clone(), repo.clone());
        (ctx, fake, repo)
    }

    #[tokio::test]
    async fn test_get_dataset_end_to_end() {
        let (ctx, fake, _) = context();
        fake.respond_ok(
            Method::Get,
            "/api/dataset/42",
            json!({"id": "42", "name": "Sales"}),
        );

        let dataset = ctx.report(ctx.datasets.get_dataset("42").await).unwrap();
        assert_eq!(dataset.id, "42");
        assert!(ctx.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_not_found_records_error_toast() {
        let (ctx, _fake, _) = context();

        let err = ctx
            .report(ctx.datasets.get_dataset("42").await)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashError>().and_then(DashError::status),
            Some(404)
        );

        let toasts = ctx.toasts.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert!(toasts[0].message.contains("404"));
    }

    #[tokio::test]
    async fn test_teardown_resets_stores_and_keeps_session() {
        let (ctx, _fake, repo) = context();
        ctx.ui.set_theme(Theme::Dark);
        ctx.session.set_session_id("s-1");
        let ui = Arc::clone(&ctx.ui);
        let toasts = Arc::clone(&ctx.toasts);
        toasts.info("pending");

        ctx.teardown().unwrap();

        assert_eq!(ui.theme(), Theme::System);
        assert!(toasts.is_empty());

        let restarted = SessionStore::new(repo);
        assert_eq!(restarted.session_id().as_deref(), Some("s-1"));
    }

    #[test]
    fn test_init_with_temp_storage() {
        let dir = crate::test_utils::temp_dir();
        let config = crate::test_utils::test_config("http://127.0.0.1:8080/api", &dir);

        let ctx = AppContext::init(&config).unwrap();
        assert!(ctx.session.session_id().is_none());
    }

    #[test]
    fn test_init_rejects_bad_origin() {
        let mut config = Config::default();
        config.api.origin = "nope".to_string();
        assert!(AppContext::init(&config).is_err());
    }
}
