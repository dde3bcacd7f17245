//! Change notifications for the synced state file.
//!
//! Uses the `notify` crate with debouncing: the state file's directory is
//! watched, edits are coalesced, and `poll_changes` turns a dirty file into
//! per-key [`StoreChange`] values by diffing against the last seen state.

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crate::store::{self, AppState, StoreChange};

/// Watches the state file and reports which keys changed.
pub struct StoreWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    path: PathBuf,
    last: AppState,
}

impl StoreWatcher {
    /// Watch the state file, diffing against `initial`.
    ///
    /// Events are debounced with a 250ms delay so a save that rewrites the
    /// file produces one notification.
    pub fn new(path: PathBuf, initial: AppState) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let mut debouncer = new_debouncer(Duration::from_millis(250), tx)?;

        // Watch the parent directory: editors and atomic saves replace the
        // file rather than writing in place.
        let watch_root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.clone());
        debouncer
            .watcher()
            .watch(&watch_root, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("watching state file: {}", path.display());

        Ok(Self {
            _debouncer: debouncer,
            rx,
            path,
            last: initial,
        })
    }

    /// Poll for pending state changes (non-blocking).
    ///
    /// Reloads the file once when any relevant event arrived and returns one
    /// [`StoreChange`] per key whose value differs from the last poll.
    pub fn poll_changes(&mut self) -> Vec<StoreChange> {
        let mut dirty = false;

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    for event in events {
                        // Continuous events during active writes - wait for
                        // the final one.
                        if matches!(event.kind, DebouncedEventKind::AnyContinuous) {
                            continue;
                        }
                        if event.path == self.path
                            || event.path.file_name() == self.path.file_name()
                        {
                            dirty = true;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("state watcher error: {:?}", e);
                }
            }
        }

        if !dirty {
            return Vec::new();
        }

        let current = store::load_state(&self.path);
        let changes = diff_states(&self.last, &current);
        if !changes.is_empty() {
            tracing::debug!("state file changed ({} keys)", changes.len());
        }
        self.last = current;
        changes
    }
}

/// One [`StoreChange`] per key that differs between two snapshots.
pub fn diff_states(old: &AppState, new: &AppState) -> Vec<StoreChange> {
    let mut changes = Vec::new();
    if old.pinned_sites != new.pinned_sites {
        changes.push(StoreChange::PinnedSites {
            new_value: new.pinned_sites.clone(),
        });
    }
    if old.last_opened_url != new.last_opened_url {
        changes.push(StoreChange::LastOpenedUrl {
            new_value: new.last_opened_url.clone(),
        });
    }
    if old.use_mobile_view != new.use_mobile_view {
        changes.push(StoreChange::UseMobileView {
            new_value: new.use_mobile_view,
        });
    }
    if old.tab_trigger != new.tab_trigger {
        changes.push(StoreChange::TabTrigger {
            new_value: new.tab_trigger.clone(),
        });
    }
    changes
}
