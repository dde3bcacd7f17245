//! Rich editable region: a node tree with a selection-based caret.
//!
//! Mirrors a content-editable element. The caret is a (path, offset) pair
//! into the tree; replacement only works when the path lands on a text node,
//! and the text before the caret is read from that single node - sibling and
//! parent text runs are deliberately out of scope.

use super::{EditableField, FieldEvent};

/// One node of the rich region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichNode {
    Text(String),
    Element { tag: String, children: Vec<RichNode> },
}

impl RichNode {
    pub fn text(content: &str) -> Self {
        RichNode::Text(content.to_string())
    }

    pub fn element(tag: &str, children: Vec<RichNode>) -> Self {
        RichNode::Element {
            tag: tag.to_string(),
            children,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            RichNode::Text(content) => out.push_str(content),
            RichNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Selection start: the index path of the container node plus an offset
/// within it (a char offset for text nodes, a child index for elements).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caret {
    pub path: Vec<usize>,
    pub offset: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RichField {
    children: Vec<RichNode>,
    caret: Option<Caret>,
    events: Vec<FieldEvent>,
}

impl RichField {
    pub fn new(children: Vec<RichNode>) -> Self {
        Self {
            children,
            caret: None,
            events: Vec::new(),
        }
    }

    /// Region holding one text node, caret at its end.
    pub fn single_text(content: &str) -> Self {
        let mut field = Self::new(vec![RichNode::text(content)]);
        field.set_caret(vec![0], content.chars().count());
        field
    }

    pub fn caret(&self) -> Option<&Caret> {
        self.caret.as_ref()
    }

    pub fn node_at(&self, path: &[usize]) -> Option<&RichNode> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.children.get(first)?;
        for &index in rest {
            match node {
                RichNode::Element { children, .. } => node = children.get(index)?,
                RichNode::Text(_) => return None,
            }
        }
        Some(node)
    }

    /// Place the caret. Returns false (caret unchanged) when the path does
    /// not resolve or the offset is out of range for the container.
    pub fn set_caret(&mut self, path: Vec<usize>, offset: usize) -> bool {
        let in_range = match self.node_at(&path) {
            Some(RichNode::Text(content)) => offset <= content.chars().count(),
            Some(RichNode::Element { children, .. }) => offset <= children.len(),
            None => false,
        };
        if !in_range {
            return false;
        }
        self.caret = Some(Caret { path, offset });
        true
    }

    /// Host-page style mutation: drop a top-level child. The caret is left
    /// untouched and may now dangle, exactly like a live DOM selection.
    pub fn remove_child(&mut self, index: usize) -> bool {
        if index >= self.children.len() {
            return false;
        }
        self.children.remove(index);
        true
    }

    fn text_node_mut(&mut self, path: &[usize]) -> Option<&mut String> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.children.get_mut(first)?;
        for &index in rest {
            match node {
                RichNode::Element { children, .. } => node = children.get_mut(index)?,
                RichNode::Text(_) => return None,
            }
        }
        match node {
            RichNode::Text(content) => Some(content),
            RichNode::Element { .. } => None,
        }
    }
}

impl EditableField for RichField {
    fn content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    fn text_before_caret(&self) -> Option<String> {
        let caret = self.caret.as_ref()?;
        match self.node_at(&caret.path)? {
            RichNode::Text(content) => {
                if caret.offset > content.chars().count() {
                    return None;
                }
                Some(content.chars().take(caret.offset).collect())
            }
            // Caret sits directly inside markup (e.g. an empty <b>); not a
            // supported splice target.
            RichNode::Element { .. } => None,
        }
    }

    fn splice_at_caret(&mut self, remove_len: usize, text: &str) -> bool {
        let Some(caret) = self.caret.clone() else {
            return false;
        };
        let Some(RichNode::Text(content)) = self.node_at(&caret.path) else {
            return false;
        };
        let content = content.clone();
        if caret.offset > content.chars().count() || remove_len > caret.offset {
            return false;
        }

        let start = caret.offset - remove_len;
        let prefix: String = content.chars().take(start).collect();
        let suffix: String = content.chars().skip(caret.offset).collect();
        let new_offset = start + text.chars().count();
        let new_content = format!("{prefix}{text}{suffix}");

        let Some(node_text) = self.text_node_mut(&caret.path) else {
            return false;
        };
        *node_text = new_content;

        // The text write has already landed; failing to rebuild the selection
        // only degrades caret placement.
        if !self.set_caret(caret.path.clone(), new_offset) {
            tracing::warn!(path = ?caret.path, "failed to restore selection after splice");
            self.caret = None;
        }

        self.events.push(FieldEvent::Input { bubbles: true });
        true
    }

    fn take_events(&mut self) -> Vec<FieldEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_text_splice() {
        let mut field = RichField::single_text("note @tab");
        assert!(field.splice_at_caret(4, "https://a.test "));
        assert_eq!(field.content(), "note https://a.test ");
        assert_eq!(
            field.caret(),
            Some(&Caret {
                path: vec![0],
                offset: "note https://a.test ".chars().count(),
            })
        );
        assert_eq!(field.take_events().len(), 1);
    }

    #[test]
    fn test_splice_in_nested_text_node() {
        let mut field = RichField::new(vec![
            RichNode::text("intro "),
            RichNode::element("b", vec![RichNode::text("bold @tab")]),
        ]);
        assert!(field.set_caret(vec![1, 0], 9));
        assert!(field.splice_at_caret(4, "https://a.test "));
        assert_eq!(field.content(), "intro bold https://a.test ");
    }

    #[test]
    fn test_caret_on_element_is_unsupported() {
        let mut field = RichField::new(vec![
            RichNode::text("before"),
            RichNode::element("b", vec![RichNode::text("@tab")]),
        ]);
        // Caret directly inside the <b> element, not in its text child.
        assert!(field.set_caret(vec![1], 1));
        assert_eq!(field.text_before_caret(), None);
        assert!(!field.splice_at_caret(4, "url "));
        assert_eq!(field.content(), "before@tab");
        assert!(field.take_events().is_empty());
    }

    #[test]
    fn test_text_before_caret_reads_single_node_only() {
        let mut field = RichField::new(vec![RichNode::text("@ta"), RichNode::text("b more")]);
        assert!(field.set_caret(vec![1], 1));
        // Only "b" precedes the caret within its own node.
        assert_eq!(field.text_before_caret().as_deref(), Some("b"));
    }

    #[test]
    fn test_dangling_caret_after_host_mutation() {
        let mut field = RichField::new(vec![
            RichNode::text("a"),
            RichNode::element("b", vec![RichNode::text("@tab")]),
        ]);
        assert!(field.set_caret(vec![1, 0], 4));
        assert!(field.remove_child(1));
        // Path [1, 0] no longer resolves to a text node.
        assert_eq!(field.text_before_caret(), None);
        assert!(!field.splice_at_caret(4, "url "));
        assert_eq!(field.content(), "a");
    }

    #[test]
    fn test_set_caret_rejects_out_of_range_offset() {
        let mut field = RichField::new(vec![RichNode::text("ab")]);
        assert!(!field.set_caret(vec![0], 3));
        assert!(!field.set_caret(vec![1], 0));
        assert_eq!(field.caret(), None);
    }

    #[test]
    fn test_no_caret_means_no_op() {
        let mut field = RichField::new(vec![RichNode::text("@tab")]);
        assert_eq!(field.text_before_caret(), None);
        assert!(!field.splice_at_caret(4, "url "));
    }
}
