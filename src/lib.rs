//! datadash - client library for a data-analysis dashboard
//!
//! This library provides the client-side core of the dashboard: a typed
//! request layer over the backend's JSON envelope, resource services for
//! datasets and users, and the client state stores (UI flags, the persisted
//! chat session, and toast notifications).
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: response envelopes, the transport seam, and the request client
//! - `services`: dataset and user endpoints
//! - `models`: resource shapes returned by the backend
//! - `store`: UI, session, and toast stores
//! - `app`: the application context wiring everything together
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use datadash::{AppContext, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let ctx = AppContext::init(&config)?;
//!     let datasets = ctx.report(ctx.datasets.get_datasets().await)?;
//!     println!("{} datasets", datasets.len());
//!     ctx.teardown()
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;

// Re-export commonly used types
pub use api::{ApiResponse, PageParams, PaginatedResponse, RequestClient};
pub use app::AppContext;
pub use config::Config;
pub use error::{DashError, Result};
pub use models::{Dataset, ProfileUpdate, User};
pub use services::{DatasetService, UserService};
pub use store::{SessionStore, Theme, ToastKind, ToastQueue, UiStore};

#[cfg(test)]
pub mod test_utils;
