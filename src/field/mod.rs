//! Editable-surface abstraction for the replacement engine.
//!
//! Two very different surfaces receive input: plain fields with a linear
//! string value and a numeric caret, and rich regions where the caret lives
//! inside a node tree. [`EditableField`] gives the engine one contract over
//! both: read the text before the caret, splice a replacement in, leave the
//! caret after it.
//!
//! Programmatic splices record a synthetic bubbling input event, because host
//! pages bind their own state to input events and must observe the change as
//! if the user typed it.

mod plain;
mod rich;

pub use plain::PlainField;
pub use rich::{Caret, RichField, RichNode};

/// Event recorded on a field for host-page listeners to observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Input { bubbles: bool },
}

/// Uniform editing surface.
///
/// Offsets and lengths are `char` offsets throughout.
pub trait EditableField {
    /// Full visible text of the field, used for the cheap dispatch pre-check.
    fn content(&self) -> String;

    /// Text from the start of the caret's text run up to the caret.
    ///
    /// `None` when the caret sits somewhere this adapter does not support
    /// (e.g. a rich caret whose container is not a text node). The caller
    /// treats that as a no-op, not an error.
    fn text_before_caret(&self) -> Option<String>;

    /// Remove `remove_len` characters immediately before the caret, insert
    /// `text`, and place the caret immediately after the inserted text.
    ///
    /// Returns false without mutating when the caret is unsupported or fewer
    /// than `remove_len` characters precede it. On success a synthetic input
    /// event is recorded.
    fn splice_at_caret(&mut self, remove_len: usize, text: &str) -> bool;

    /// Drain events recorded by programmatic edits.
    fn take_events(&mut self) -> Vec<FieldEvent>;
}
