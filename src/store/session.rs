//! Persisted session store
//!
//! Keeps the id of the active chat/analysis session and writes it through
//! to durable storage on every change, so it survives process restarts.
//!
//! Persistence follows a repository pattern: [`SessionStore`] owns the
//! in-memory state and calls [`SessionRepository::load`] once (lazily, on
//! first access) and [`SessionRepository::save`] after every mutation. The
//! storage technology is swappable: [`SledSessionRepository`] for the CLI,
//! [`MemorySessionRepository`] for tests and throwaway runs.
//!
//! The durable slot is named `"chat-storage"` and holds
//! `{"state": {"sessionId": ...}, "version": 0}` as JSON.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};

/// Key of the durable slot.
pub const STORAGE_KEY: &str = "chat-storage";

/// Version written alongside the state; other versions are discarded on load.
pub const STORAGE_VERSION: u32 = 0;

/// Session state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatState {
    /// Active session id, `None` when no session is live
    #[serde(default)]
    pub session_id: Option<String>,
}

/// On-disk wrapper around [`ChatState`].
#[derive(Debug, Serialize, Deserialize)]
struct PersistedState {
    state: ChatState,
    version: u32,
}

/// Serialize a state into the durable slot format
pub fn encode_state(state: &ChatState) -> Result<Vec<u8>> {
    let persisted = PersistedState {
        state: state.clone(),
        version: STORAGE_VERSION,
    };
    Ok(serde_json::to_vec(&persisted)?)
}

/// Deserialize the durable slot format
///
/// Returns `Ok(None)` when the slot was written with another version.
pub fn decode_state(bytes: &[u8]) -> Result<Option<ChatState>> {
    let persisted: PersistedState = serde_json::from_slice(bytes)
        .map_err(|e| DashError::Storage(format!("Deserialization failed: {}", e)))?;
    if persisted.version != STORAGE_VERSION {
        tracing::warn!(
            found = persisted.version,
            expected = STORAGE_VERSION,
            "Discarding persisted session state with unknown version"
        );
        return Ok(None);
    }
    Ok(Some(persisted.state))
}

/// Durable storage for [`ChatState`].
pub trait SessionRepository: Send + Sync + std::fmt::Debug {
    /// Read the persisted state, `None` if nothing was stored
    fn load(&self) -> Result<Option<ChatState>>;

    /// Persist `state`, replacing any previous value
    fn save(&self, state: &ChatState) -> Result<()>;

    /// Make previous writes durable
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

/// Session repository backed by an embedded `sled` database.
#[derive(Debug, Clone)]
pub struct SledSessionRepository {
    db: sled::Db,
}

impl SledSessionRepository {
    /// Open or create the database at `path`
    ///
    /// # Errors
    ///
    /// Returns `DashError::Storage` if the database cannot be opened
    ///
    /// # Examples
    ///
    /// ```
    /// use datadash::store::session::{SessionRepository, SledSessionRepository};
    ///
    /// # fn main() -> datadash::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let repo = SledSessionRepository::new(dir.path().join("sessions.db"))?;
    /// assert!(repo.load()?.is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let db = sled::open(path)
            .map_err(|e| DashError::Storage(format!("Failed to open database: {}", e)))?;
        Ok(Self { db })
    }

    /// Open the database at `path`, or at [`default_path`](Self::default_path)
    ///
    /// # Errors
    ///
    /// Returns `DashError::Storage` if no data directory can be determined
    /// or the database cannot be opened
    pub fn open(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::new(path),
            None => Self::new(Self::default_path()?),
        }
    }

    /// Platform data directory location of the session database
    ///
    /// # Errors
    ///
    /// Returns `DashError::Storage` if no home directory can be determined
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "datadash", "datadash")
            .ok_or_else(|| DashError::Storage("Could not determine data directory".into()))?;
        Ok(proj_dirs.data_dir().join("sessions.db"))
    }
}

impl SessionRepository for SledSessionRepository {
    fn load(&self) -> Result<Option<ChatState>> {
        match self
            .db
            .get(STORAGE_KEY)
            .map_err(|e| DashError::Storage(format!("Get failed: {}", e)))?
        {
            Some(bytes) => decode_state(&bytes),
            None => Ok(None),
        }
    }

    fn save(&self, state: &ChatState) -> Result<()> {
        let value = encode_state(state)?;

        self.db
            .insert(STORAGE_KEY, value)
            .map_err(|e| DashError::Storage(format!("Insert failed: {}", e)))?;

        self.flush()
    }

    fn flush(&self) -> Result<()> {
        self.db
            .flush()
            .map_err(|e| DashError::Storage(format!("Flush failed: {}", e)))?;
        Ok(())
    }
}

/// In-process session repository.
///
/// Stores the encoded slot bytes, so the on-disk format is exercised. Can be
/// switched to an unavailable mode to simulate disabled or full storage.
#[derive(Debug, Default)]
pub struct MemorySessionRepository {
    slot: Mutex<Option<Vec<u8>>>,
    unavailable: AtomicBool,
}

impl MemorySessionRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository whose slot already holds `bytes`
    pub fn with_raw(bytes: Vec<u8>) -> Self {
        Self {
            slot: Mutex::new(Some(bytes)),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Make every `load`/`save` fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Raw slot contents
    pub fn raw(&self) -> Option<Vec<u8>> {
        self.lock_slot().clone()
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        match self.slot.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DashError::Storage("storage unavailable".to_string()).into());
        }
        Ok(())
    }
}

impl SessionRepository for MemorySessionRepository {
    fn load(&self) -> Result<Option<ChatState>> {
        self.check_available()?;
        match self.lock_slot().as_deref() {
            Some(bytes) => decode_state(bytes),
            None => Ok(None),
        }
    }

    fn save(&self, state: &ChatState) -> Result<()> {
        self.check_available()?;
        let value = encode_state(state)?;
        *self.lock_slot() = Some(value);
        Ok(())
    }
}

#[derive(Debug)]
enum Hydration {
    Uninitialized,
    Hydrated(ChatState),
}

/// Session store with write-through persistence.
///
/// The store starts uninitialized; the first read or write loads the
/// persisted state (falling back to an empty state when nothing is stored
/// or storage is unavailable). Every mutation is saved immediately. Save
/// failures never surface to callers: they are logged and the last one is
/// kept for [`last_save_error`](Self::last_save_error).
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use datadash::store::session::{MemorySessionRepository, SessionStore};
///
/// let repo = Arc::new(MemorySessionRepository::new());
/// let store = SessionStore::new(repo.clone());
/// store.set_session_id("sess-1");
///
/// // A fresh store over the same storage sees the persisted id.
/// let restarted = SessionStore::new(repo);
/// assert_eq!(restarted.session_id().as_deref(), Some("sess-1"));
/// ```
#[derive(Debug)]
pub struct SessionStore {
    repo: Arc<dyn SessionRepository>,
    state: Mutex<Hydration>,
    last_save_error: Mutex<Option<String>>,
}

impl SessionStore {
    /// Create an uninitialized store over `repo`
    pub fn new(repo: Arc<dyn SessionRepository>) -> Self {
        Self {
            repo,
            state: Mutex::new(Hydration::Uninitialized),
            last_save_error: Mutex::new(None),
        }
    }

    /// Whether the persisted state has been loaded
    pub fn is_hydrated(&self) -> bool {
        matches!(*self.lock_state(), Hydration::Hydrated(_))
    }

    /// Current state, hydrating first if needed
    pub fn state(&self) -> ChatState {
        let mut guard = self.lock_state();
        self.hydrated(&mut guard).clone()
    }

    /// Active session id, hydrating first if needed
    pub fn session_id(&self) -> Option<String> {
        self.state().session_id
    }

    /// Set the active session id and persist it
    pub fn set_session_id(&self, id: impl Into<String>) {
        let id = id.into();
        tracing::debug!(session_id = %id, "Setting session id");
        self.mutate(|state| state.session_id = Some(id));
    }

    /// Forget the active session id and persist the change
    pub fn clear_session(&self) {
        tracing::debug!("Clearing session id");
        self.mutate(|state| state.session_id = None);
    }

    /// Message of the most recent failed save, cleared by the next success
    pub fn last_save_error(&self) -> Option<String> {
        match self.last_save_error.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Flush the repository
    ///
    /// # Errors
    ///
    /// Returns the repository's flush error
    pub fn flush(&self) -> Result<()> {
        self.repo.flush()
    }

    fn mutate(&self, f: impl FnOnce(&mut ChatState)) {
        let mut guard = self.lock_state();
        let state = self.hydrated(&mut guard);
        f(state);

        let outcome = self.repo.save(state);
        let mut last_error = match self.last_save_error.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match outcome {
            Ok(()) => *last_error = None,
            Err(e) => {
                tracing::warn!("Failed to persist session state: {}", e);
                *last_error = Some(e.to_string());
            }
        }
    }

    fn hydrated<'a>(&self, guard: &'a mut MutexGuard<'_, Hydration>) -> &'a mut ChatState {
        if let Hydration::Uninitialized = **guard {
            let loaded = match self.repo.load() {
                Ok(Some(state)) => state,
                Ok(None) => ChatState::default(),
                Err(e) => {
                    tracing::warn!("Failed to load persisted session state: {}", e);
                    ChatState::default()
                }
            };
            tracing::debug!(session_id = ?loaded.session_id, "Session store hydrated");
            **guard = Hydration::Hydrated(loaded);
        }

        match &mut **guard {
            Hydration::Hydrated(state) => state,
            Hydration::Uninitialized => unreachable!("hydrated above"),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, Hydration> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
