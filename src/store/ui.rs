//! Ephemeral UI store
//!
//! Holds sidebar visibility and the colour theme. The state lives only in
//! memory: it starts from defaults when the store is created and is gone
//! when the store is dropped.

use std::fmt;
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::DashError;

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
            Theme::System => write!(f, "system"),
        }
    }
}

impl FromStr for Theme {
    type Err = DashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(DashError::InvalidTheme(s.to_string())),
        }
    }
}

/// Snapshot of the UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Whether the sidebar is shown
    pub is_sidebar_open: bool,
    /// Active theme
    pub theme: Theme,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            is_sidebar_open: true,
            theme: Theme::System,
        }
    }
}

/// In-memory UI store.
///
/// Share one instance through `Arc<UiStore>`; every operation takes `&self`
/// and is immediately visible to all readers. Mutations are last-write-wins.
///
/// # Examples
///
/// ```
/// use datadash::store::ui::{Theme, UiStore};
///
/// let store = UiStore::new();
/// assert!(store.is_sidebar_open());
///
/// store.toggle_sidebar();
/// assert!(!store.is_sidebar_open());
///
/// store.set_theme(Theme::Dark);
/// assert_eq!(store.theme(), Theme::Dark);
/// ```
#[derive(Debug, Default)]
pub struct UiStore {
    state: RwLock<UiState>,
}

impl UiStore {
    /// Create a store holding the default state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn snapshot(&self) -> UiState {
        match self.state.read() {
            Ok(state) => *state,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Whether the sidebar is shown
    pub fn is_sidebar_open(&self) -> bool {
        self.snapshot().is_sidebar_open
    }

    /// Active theme
    pub fn theme(&self) -> Theme {
        self.snapshot().theme
    }

    /// Flip sidebar visibility, returning the new value
    pub fn toggle_sidebar(&self) -> bool {
        self.update(|state| {
            state.is_sidebar_open = !state.is_sidebar_open;
            state.is_sidebar_open
        })
    }

    /// Show or hide the sidebar
    pub fn set_sidebar_open(&self, open: bool) {
        self.update(|state| state.is_sidebar_open = open);
    }

    /// Switch the theme
    pub fn set_theme(&self, theme: Theme) {
        self.update(|state| state.theme = theme);
    }

    /// Switch the theme by name
    ///
    /// # Errors
    ///
    /// Returns `DashError::InvalidTheme` for anything but `light`, `dark`,
    /// `system`; the state is left unchanged.
    pub fn set_theme_by_name(&self, name: &str) -> crate::error::Result<()> {
        let theme: Theme = name.parse()?;
        self.set_theme(theme);
        Ok(())
    }

    /// Restore the defaults
    pub fn reset(&self) {
        self.update(|state| *state = UiState::default());
    }

    fn update<R>(&self, f: impl FnOnce(&mut UiState) -> R) -> R {
        let mut guard = match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let result = f(&mut guard);
        tracing::debug!(state = ?*guard, "UI state updated");
        result
    }
}
