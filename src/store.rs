//! Synced key-value state persistence.
//!
//! Stores the pinned-site list and user preferences in
//! `~/.config/tabdock/state.yaml`. Quota limits mirror a synchronized
//! storage backend: they are enforced here, at the persistence boundary,
//! and nowhere else.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trigger::{validate_trigger, TriggerError, DEFAULT_TRIGGER};

/// Hard cap on the pinned-site list length.
pub const MAX_SITES: usize = 30;
/// Cap on the serialized pinned-site list, with padding under the backend's
/// 8192-byte per-item quota.
pub const MAX_ITEM_BYTES: usize = 8000;

/// One entry of the dock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinnedSite {
    pub id: String,
    pub url: String,
    pub name: String,
    pub favicon: String,
}

/// Everything the extension persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub pinned_sites: Vec<PinnedSite>,
    #[serde(default)]
    pub last_opened_url: Option<String>,
    #[serde(default = "default_use_mobile_view")]
    pub use_mobile_view: bool,
    #[serde(default = "default_tab_trigger")]
    pub tab_trigger: String,
}

fn default_use_mobile_view() -> bool {
    true
}

fn default_tab_trigger() -> String {
    DEFAULT_TRIGGER.to_string()
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pinned_sites: Vec::new(),
            last_opened_url: None,
            use_mobile_view: default_use_mobile_view(),
            tab_trigger: default_tab_trigger(),
        }
    }
}

/// Rejections at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("pinned site limit exceeded: {0} sites (max 30)")]
    CountLimitExceeded(usize),
    #[error("serialized pinned sites too large: {0} bytes (max 8000)")]
    SizeLimitExceeded(usize),
    #[error(transparent)]
    InvalidTrigger(#[from] TriggerError),
    #[error("failed to persist state: {0}")]
    Persist(String),
}

/// A change to one stored key, as delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreChange {
    PinnedSites { new_value: Vec<PinnedSite> },
    LastOpenedUrl { new_value: Option<String> },
    UseMobileView { new_value: bool },
    TabTrigger { new_value: String },
}

/// Load state from disk, or return defaults if missing or unreadable.
pub fn load_state(path: &Path) -> AppState {
    if !path.exists() {
        tracing::debug!("state file not found at {}, using defaults", path.display());
        return AppState::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => match serde_yaml::from_str(&content) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("failed to parse state at {}: {}", path.display(), e);
                AppState::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read state at {}: {}", path.display(), e);
            AppState::default()
        }
    }
}

/// Owns the state file: reads once at startup, writes through setters that
/// enforce the quota and validation rules.
#[derive(Debug)]
pub struct SyncStore {
    path: PathBuf,
    state: AppState,
}

impl SyncStore {
    /// Open the store at an explicit path, loading current state (defaults
    /// when the file is absent).
    pub fn open(path: PathBuf) -> Self {
        let state = load_state(&path);
        Self { path, state }
    }

    /// Open the store at the user config location.
    pub fn open_default() -> Option<Self> {
        crate::config_paths::state_file().map(Self::open)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn tab_trigger(&self) -> &str {
        &self.state.tab_trigger
    }

    /// Replace the pinned-site list.
    ///
    /// Both limits are checked before anything changes, so a rejected update
    /// leaves the stored list untouched. The size check measures the JSON
    /// serialization of the list alone, matching how the sync backend
    /// accounts per-item quota.
    pub fn set_pinned_sites(&mut self, sites: Vec<PinnedSite>) -> Result<(), StoreError> {
        if sites.len() > MAX_SITES {
            return Err(StoreError::CountLimitExceeded(sites.len()));
        }
        let serialized =
            serde_json::to_string(&sites).map_err(|e| StoreError::Persist(e.to_string()))?;
        if serialized.len() > MAX_ITEM_BYTES {
            return Err(StoreError::SizeLimitExceeded(serialized.len()));
        }
        self.state.pinned_sites = sites;
        self.save()
    }

    pub fn set_last_opened_url(&mut self, url: &str) -> Result<(), StoreError> {
        self.state.last_opened_url = Some(url.to_string());
        self.save()
    }

    pub fn set_use_mobile_view(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.state.use_mobile_view = enabled;
        self.save()
    }

    /// Update the trigger. Invalid values are rejected before anything is
    /// written; the previous trigger stays active.
    pub fn set_tab_trigger(&mut self, trigger: &str) -> Result<(), StoreError> {
        validate_trigger(trigger)?;
        self.state.tab_trigger = trigger.to_string();
        self.save()
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Persist(format!("failed to create state directory: {e}"))
            })?;
        }

        let content =
            serde_yaml::to_string(&self.state).map_err(|e| StoreError::Persist(e.to_string()))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::Persist(format!("{}: {e}", self.path.display())))?;

        tracing::debug!("saved state to {}", self.path.display());
        Ok(())
    }
}
