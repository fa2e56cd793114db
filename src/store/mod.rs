//! Client-side state containers
//!
//! - [`ui`]: in-memory sidebar and theme flags
//! - [`session`]: the chat session id, written through to durable storage
//! - [`toast`]: self-expiring user notifications
//!
//! Stores are plain values handed to their consumers (usually through
//! [`AppContext`](crate::app::AppContext)); there is no global instance.

pub mod session;
pub mod toast;
pub mod ui;

pub use session::{
    ChatState, MemorySessionRepository, SessionRepository, SessionStore, SledSessionRepository,
};
pub use toast::{Toast, ToastKind, ToastQueue, TOAST_DURATION};
pub use ui::{Theme, UiState, UiStore};
