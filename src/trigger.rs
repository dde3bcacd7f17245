//! Trigger configuration: the marker string that requests a URL substitution.
//!
//! The trigger is seeded from the synced state at startup and swapped in place
//! whenever a change notification arrives. The replacement engine only ever
//! reads it.

use thiserror::Error;

/// Trigger used when nothing valid is configured.
pub const DEFAULT_TRIGGER: &str = "@tab";

/// Why a candidate trigger string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("trigger must start with '@'")]
    MissingAt,
    #[error("trigger must be at least 3 characters long")]
    TooShort,
    #[error("trigger may only contain letters and digits after '@'")]
    NotAlphanumeric,
}

/// Validate a candidate trigger: `@` followed by at least two ASCII
/// alphanumeric characters (case-insensitive).
pub fn validate_trigger(candidate: &str) -> Result<(), TriggerError> {
    if !candidate.starts_with('@') {
        return Err(TriggerError::MissingAt);
    }
    if candidate.chars().count() < 3 {
        return Err(TriggerError::TooShort);
    }
    let after_at = &candidate[1..];
    if !after_at.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(TriggerError::NotAlphanumeric);
    }
    Ok(())
}

/// Holds the current trigger string.
///
/// Updates are a single value swap; readers observe either the old or the new
/// trigger, never a torn one. Invalid updates are rejected and the previous
/// valid trigger stays active.
#[derive(Debug, Clone)]
pub struct TriggerStore {
    current: String,
}

impl TriggerStore {
    /// Seed the store from a persisted value. Falls back to [`DEFAULT_TRIGGER`]
    /// when the persisted value does not validate.
    pub fn new(initial: &str) -> Self {
        match validate_trigger(initial) {
            Ok(()) => Self {
                current: initial.to_string(),
            },
            Err(e) => {
                tracing::warn!(
                    "persisted trigger {:?} is invalid ({}), falling back to {:?}",
                    initial,
                    e,
                    DEFAULT_TRIGGER
                );
                Self::default()
            }
        }
    }

    /// The active trigger string.
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Replace the trigger with a new value from a change notification.
    pub fn apply_update(&mut self, new_value: &str) -> Result<(), TriggerError> {
        validate_trigger(new_value)?;
        self.current = new_value.to_string();
        Ok(())
    }
}

impl Default for TriggerStore {
    fn default() -> Self {
        Self {
            current: DEFAULT_TRIGGER.to_string(),
        }
    }
}
