//! Trigger replacement engine.
//!
//! Detects a completed trigger sequence before the caret, fetches the active
//! tab URL through the resolver, splices the URL in, and leaves the caret
//! after the inserted text. Each attempt is independent: the only shared
//! state is the read-only trigger string.

use crate::field::EditableField;
use crate::resolver::TabUrlResolver;
use crate::trigger::TriggerStore;

/// The gesture that completed the trigger.
///
/// A delimiter keystroke contributes its own space to the match, so the
/// user's space is absorbed into the replaced range. The Tab key inserts
/// nothing, so the trigger is matched bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationSuffix {
    Delimiter,
    TabKey,
}

impl ActivationSuffix {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationSuffix::Delimiter => " ",
            ActivationSuffix::TabKey => "",
        }
    }
}

pub struct ReplacementEngine {
    trigger: TriggerStore,
    resolver: TabUrlResolver,
}

impl ReplacementEngine {
    pub fn new(trigger: TriggerStore, resolver: TabUrlResolver) -> Self {
        Self { trigger, resolver }
    }

    pub fn current_trigger(&self) -> &str {
        self.trigger.current()
    }

    pub fn trigger_mut(&mut self) -> &mut TriggerStore {
        &mut self.trigger
    }

    /// Try to replace the trigger sequence ending at the caret with the
    /// active tab URL plus a trailing space. Returns true if the splice
    /// happened.
    ///
    /// The URL round trip happens before the field is inspected; the caret
    /// may move while it is in flight, and the splice then applies at the
    /// caret's position as found afterwards. Known staleness window, kept
    /// as observed behavior.
    pub fn attempt_replacement(
        &self,
        target: &mut dyn EditableField,
        suffix: ActivationSuffix,
    ) -> bool {
        let full_trigger = format!("{}{}", self.trigger.current(), suffix.as_str());

        let Some(url) = self.resolver.resolve_active_tab_url() else {
            tracing::debug!("no active tab url; leaving field untouched");
            return false;
        };

        let Some(text_before) = target.text_before_caret() else {
            return false;
        };
        if !text_before.ends_with(&full_trigger) {
            return false;
        }

        let replacement = format!("{url} ");
        let replaced = target.splice_at_caret(full_trigger.chars().count(), &replacement);
        if replaced {
            tracing::debug!(trigger = %full_trigger, %url, "replaced trigger with tab url");
        }
        replaced
    }
}
