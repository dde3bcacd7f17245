//! Document-level event dispatch.
//!
//! Two listeners feed one engine: input events (delimiter gesture) and
//! keydown events (Tab gesture). Both run in capture mode in the host page,
//! so a successful Tab replacement can cancel the default focus move before
//! the page reacts.

use crate::engine::{ActivationSuffix, ReplacementEngine};
use crate::field::EditableField;
use crate::store::StoreChange;

/// The subset of keyboard keys the dispatcher distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    Char(char),
    Other,
}

/// What the caller should do with the browser's default handling of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyDisposition {
    pub prevent_default: bool,
    pub stop_propagation: bool,
}

impl KeyDisposition {
    /// Let the event through untouched.
    pub const PASS: Self = Self {
        prevent_default: false,
        stop_propagation: false,
    };

    /// Swallow the event entirely.
    pub const SUPPRESS: Self = Self {
        prevent_default: true,
        stop_propagation: true,
    };
}

/// Owns the engine and filters raw events before invoking it.
pub struct EventDispatcher {
    engine: ReplacementEngine,
}

impl EventDispatcher {
    pub fn new(engine: ReplacementEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ReplacementEngine {
        &self.engine
    }

    /// Input-event listener (delimiter gesture). Returns true if a
    /// replacement happened.
    ///
    /// The containment scan bounds the cost of every keystroke on the page:
    /// fields that do not mention the trigger anywhere skip the broker round
    /// trip entirely.
    pub fn on_input(&self, target: &mut dyn EditableField) -> bool {
        if !target.content().contains(self.engine.current_trigger()) {
            return false;
        }
        self.engine
            .attempt_replacement(target, ActivationSuffix::Delimiter)
    }

    /// Keydown listener (Tab gesture). A successful replacement suppresses
    /// the default action so focus stays put and the host page never sees
    /// the Tab.
    pub fn on_keydown(&self, key: &Key, target: &mut dyn EditableField) -> KeyDisposition {
        if *key != Key::Tab {
            return KeyDisposition::PASS;
        }
        if self
            .engine
            .attempt_replacement(target, ActivationSuffix::TabKey)
        {
            KeyDisposition::SUPPRESS
        } else {
            KeyDisposition::PASS
        }
    }

    /// Subscription callback for synced-state change notifications.
    pub fn apply_store_change(&mut self, change: &StoreChange) {
        if let StoreChange::TabTrigger { new_value } = change {
            match self.engine.trigger_mut().apply_update(new_value) {
                Ok(()) => tracing::debug!(trigger = %new_value, "trigger updated"),
                Err(e) => {
                    tracing::warn!("ignoring invalid trigger update {:?}: {}", new_value, e)
                }
            }
        }
    }
}
