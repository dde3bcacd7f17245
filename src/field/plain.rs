//! Plain text field: a linear string value with a numeric caret.
//!
//! Models single- and multi-line inputs whose whole value is one string
//! (text inputs, textareas).

use super::{EditableField, FieldEvent};

#[derive(Debug, Clone, Default)]
pub struct PlainField {
    value: String,
    /// Caret as a char offset into `value`.
    caret: usize,
    events: Vec<FieldEvent>,
}

impl PlainField {
    /// Field with the caret at the end of the text.
    pub fn new(text: &str) -> Self {
        Self {
            value: text.to_string(),
            caret: text.chars().count(),
            events: Vec::new(),
        }
    }

    /// Field with the caret at a specific char offset (clamped).
    pub fn with_caret(text: &str, caret: usize) -> Self {
        let mut field = Self::new(text);
        field.set_caret(caret);
        field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn caret(&self) -> usize {
        self.caret
    }

    pub fn set_caret(&mut self, caret: usize) {
        self.caret = caret.min(self.value.chars().count());
    }

    /// Simulate the user typing one character at the caret. Records an input
    /// event per keystroke, like the platform would.
    pub fn type_char(&mut self, ch: char) {
        let byte = self.char_to_byte(self.caret);
        self.value.insert(byte, ch);
        self.caret += 1;
        self.events.push(FieldEvent::Input { bubbles: true });
    }

    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.type_char(ch);
        }
    }

    /// Convert char offset to byte offset
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }
}

impl EditableField for PlainField {
    fn content(&self) -> String {
        self.value.clone()
    }

    fn text_before_caret(&self) -> Option<String> {
        let byte = self.char_to_byte(self.caret);
        Some(self.value[..byte].to_string())
    }

    fn splice_at_caret(&mut self, remove_len: usize, text: &str) -> bool {
        if remove_len > self.caret {
            return false;
        }
        let start = self.caret - remove_len;
        let start_byte = self.char_to_byte(start);
        let caret_byte = self.char_to_byte(self.caret);
        self.value.replace_range(start_byte..caret_byte, text);
        self.caret = start + text.chars().count();
        self.events.push(FieldEvent::Input { bubbles: true });
        true
    }

    fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }
}
