//! Transient notification queue
//!
//! [`ToastQueue::show`] appends a toast and starts a Tokio timer that removes
//! it after [`TOAST_DURATION`]. Each entry keeps the timer's abort handle,
//! so toasts can be dismissed early, cleared in bulk, and no timer outlives
//! the queue: dropping the queue aborts every pending timer.
//!
//! Insertion order is display order. Removal only ever drops the matching
//! id and never reorders the remaining entries.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use ulid::{Generator, Ulid};

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Toast flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Operation succeeded
    Success,
    /// Operation failed
    Error,
    /// Neutral information
    #[default]
    Info,
}

impl std::fmt::Display for ToastKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastKind::Success => write!(f, "success"),
            ToastKind::Error => write!(f, "error"),
            ToastKind::Info => write!(f, "info"),
        }
    }
}

/// A user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Unique id generated at creation
    pub id: String,
    /// Message text
    pub message: String,
    /// Flavour
    #[serde(rename = "type")]
    pub kind: ToastKind,
}

#[derive(Debug)]
struct Entry {
    toast: Toast,
    timer: Option<AbortHandle>,
}

struct Entries {
    list: Vec<Entry>,
    ids: Generator,
}

impl std::fmt::Debug for Entries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entries")
            .field("list", &self.list)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Shared {
    entries: Mutex<Entries>,
    changes: watch::Sender<Vec<Toast>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Entries> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn publish(&self, entries: &Entries) {
        let snapshot = entries.list.iter().map(|e| e.toast.clone()).collect();
        self.changes.send_replace(snapshot);
    }

    /// Remove `id` if present; a second call is a no-op
    fn expire(&self, id: &str) -> bool {
        let mut entries = self.lock();
        let before = entries.list.len();
        entries.list.retain(|e| e.toast.id != id);
        let removed = entries.list.len() != before;
        if removed {
            tracing::debug!(toast_id = %id, "Toast expired");
            self.publish(&entries);
        }
        removed
    }
}

/// Self-expiring list of toasts.
///
/// Share through `Arc<ToastQueue>`. [`show`](Self::show) must be called
/// from within a Tokio runtime for the expiry timer to be scheduled.
///
/// # Examples
///
/// ```
/// use datadash::store::toast::{ToastKind, ToastQueue};
///
/// # #[tokio::main]
/// # async fn main() {
/// let queue = ToastQueue::new();
/// let id = queue.show("Saved", ToastKind::Success);
///
/// let toasts = queue.toasts();
/// assert_eq!(toasts.len(), 1);
/// assert_eq!(toasts[0].id, id);
/// # }
/// ```
#[derive(Debug)]
pub struct ToastQueue {
    shared: Arc<Shared>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            shared: Arc::new(Shared {
                entries: Mutex::new(Entries {
                    list: Vec::new(),
                    ids: Generator::new(),
                }),
                changes,
            }),
        }
    }

    /// Append a toast and schedule its removal after [`TOAST_DURATION`]
    ///
    /// Returns the id of the new toast. Identical messages are not
    /// de-duplicated.
    pub fn show(&self, message: impl Into<String>, kind: ToastKind) -> String {
        let mut entries = self.shared.lock();
        let id = entries
            .ids
            .generate()
            .unwrap_or_else(|_| Ulid::new())
            .to_string();

        let timer = schedule_expiry(Arc::downgrade(&self.shared), id.clone());
        entries.list.push(Entry {
            toast: Toast {
                id: id.clone(),
                message: message.into(),
                kind,
            },
            timer,
        });
        tracing::debug!(toast_id = %id, kind = %kind, "Toast shown");
        self.shared.publish(&entries);

        id
    }

    /// Append an [`ToastKind::Info`] toast
    pub fn info(&self, message: impl Into<String>) -> String {
        self.show(message, ToastKind::Info)
    }

    /// Append a [`ToastKind::Success`] toast
    pub fn success(&self, message: impl Into<String>) -> String {
        self.show(message, ToastKind::Success)
    }

    /// Append a [`ToastKind::Error`] toast
    pub fn error(&self, message: impl Into<String>) -> String {
        self.show(message, ToastKind::Error)
    }

    /// Remove a toast now and cancel its timer
    ///
    /// Returns `false` if no toast with that id is present.
    pub fn dismiss(&self, id: &str) -> bool {
        let mut entries = self.shared.lock();
        let Some(index) = entries.list.iter().position(|e| e.toast.id == id) else {
            return false;
        };
        let entry = entries.list.remove(index);
        if let Some(timer) = entry.timer {
            timer.abort();
        }
        self.shared.publish(&entries);
        true
    }

    /// Remove every toast and cancel all pending timers
    pub fn clear(&self) {
        let mut entries = self.shared.lock();
        if entries.list.is_empty() {
            return;
        }
        for entry in entries.list.drain(..) {
            if let Some(timer) = entry.timer {
                timer.abort();
            }
        }
        self.shared.publish(&entries);
    }

    /// Active toasts in display order
    pub fn toasts(&self) -> Vec<Toast> {
        self.shared
            .lock()
            .list
            .iter()
            .map(|e| e.toast.clone())
            .collect()
    }

    /// Number of active toasts
    pub fn len(&self) -> usize {
        self.shared.lock().list.len()
    }

    /// Whether no toast is active
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Receiver notified with the full list after every change
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.shared.changes.subscribe()
    }
}

impl Drop for ToastQueue {
    fn drop(&mut self) {
        let mut entries = self.shared.lock();
        for entry in entries.list.iter_mut() {
            if let Some(timer) = entry.timer.take() {
                timer.abort();
            }
        }
    }
}

fn schedule_expiry(shared: Weak<Shared>, id: String) -> Option<AbortHandle> {
    let handle = match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle,
        Err(_) => {
            tracing::warn!(toast_id = %id, "No Tokio runtime; toast will not expire");
            return None;
        }
    };

    let task = handle.spawn(async move {
        tokio::time::sleep(TOAST_DURATION).await;
        if let Some(shared) = shared.upgrade() {
            shared.expire(&id);
        }
    });
    Some(task.abort_handle())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn advance(duration: Duration) {
        tokio::time::sleep(duration).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_n_calls_give_n_distinct_ids_in_call_order() {
        let queue = ToastQueue::new();
        let ids: Vec<String> = (0..50)
            .map(|i| queue.show(format!("toast {}", i), ToastKind::Info))
            .collect();

        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 50);

        let toasts = queue.toasts();
        assert_eq!(toasts.len(), 50);
        for (i, toast) in toasts.iter().enumerate() {
            assert_eq!(toast.id, ids[i]);
            assert_eq!(toast.message, format!("toast {}", i));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_expires_after_duration() {
        let queue = ToastQueue::new();
        queue.show("hello", ToastKind::Info);

        advance(TOAST_DURATION - Duration::from_millis(1)).await;
        assert_eq!(queue.len(), 1);

        advance(Duration::from_millis(2)).await;
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry_only_removes_matching_id() {
        let queue = ToastQueue::new();
        let first = queue.show("first", ToastKind::Success);
        advance(Duration::from_millis(1000)).await;
        let second = queue.show("second", ToastKind::Error);
        let third = queue.show("third", ToastKind::Info);

        advance(Duration::from_millis(2001)).await;
        let ids: Vec<String> = queue.toasts().into_iter().map(|t| t.id).collect();
        assert!(!ids.contains(&first));
        assert_eq!(ids, vec![second, third]);

        advance(Duration::from_millis(1000)).await;
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_messages_are_independent() {
        let queue = ToastQueue::new();
        let a = queue.show("same", ToastKind::Info);
        let b = queue.show("same", ToastKind::Info);
        assert_ne!(a, b);
        assert_eq!(queue.len(), 2);

        assert!(queue.dismiss(&a));
        assert_eq!(queue.toasts()[0].id, b);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expire_is_idempotent() {
        let queue = ToastQueue::new();
        let a = queue.show("a", ToastKind::Info);
        let b = queue.show("b", ToastKind::Info);

        assert!(queue.shared.expire(&a));
        assert!(!queue.shared.expire(&a));
        assert_eq!(queue.toasts().len(), 1);
        assert_eq!(queue.toasts()[0].id, b);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_timer() {
        let queue = ToastQueue::new();
        let a = queue.show("a", ToastKind::Info);
        assert!(queue.dismiss(&a));
        assert!(!queue.dismiss(&a));

        let mut rx = queue.subscribe();
        rx.borrow_and_update();
        advance(TOAST_DURATION * 2).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_removes_everything() {
        let queue = ToastQueue::new();
        queue.info("a");
        queue.error("b");
        queue.clear();
        assert!(queue.is_empty());

        advance(TOAST_DURATION * 2).await;
        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribe_sees_changes() {
        let queue = ToastQueue::new();
        let mut rx = queue.subscribe();

        let id = queue.success("saved");
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].id, id);

        advance(TOAST_DURATION + Duration::from_millis(1)).await;
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_shared_state() {
        let queue = ToastQueue::new();
        queue.info("pending");
        let mut rx = queue.subscribe();
        rx.borrow_and_update();

        drop(queue);
        advance(Duration::from_millis(1)).await;
        assert!(rx.changed().await.is_err());
    }

    #[test]
    fn test_show_without_runtime_keeps_toast() {
        let queue = ToastQueue::new();
        queue.show("no runtime", ToastKind::Info);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_toast_serializes_kind_as_type() {
        let toast = Toast {
            id: "x".to_string(),
            message: "m".to_string(),
            kind: ToastKind::Error,
        };
        let json = serde_json::to_value(&toast).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(ToastKind::default(), ToastKind::Info);
    }
}
