//! Browser window and tab bookkeeping for the background broker.
//!
//! The broker answers "what is the active tab URL" against this registry.
//! Only the active tab of the last-focused window counts; background windows
//! never contribute an answer.

/// A single browser tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: u32,
    pub url: String,
    pub active: bool,
}

impl Tab {
    pub fn new(id: u32, url: &str) -> Self {
        Self {
            id,
            url: url.to_string(),
            active: false,
        }
    }

    pub fn active(id: u32, url: &str) -> Self {
        Self {
            id,
            url: url.to_string(),
            active: true,
        }
    }
}

/// A browser window holding an ordered list of tabs, at most one active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserWindow {
    pub id: u32,
    pub tabs: Vec<Tab>,
}

impl BrowserWindow {
    pub fn new(id: u32, tabs: Vec<Tab>) -> Self {
        Self { id, tabs }
    }

    /// The window's active tab, if any tab is marked active.
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.active)
    }
}

/// All open windows plus their focus history.
///
/// `focus_order` lists window ids oldest-first; the last entry is the
/// last-focused window.
#[derive(Debug, Clone, Default)]
pub struct TabRegistry {
    windows: Vec<BrowserWindow>,
    focus_order: Vec<u32>,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with one window holding a single active tab. Convenient for
    /// the demo binary and tests.
    pub fn single_window(url: &str) -> Self {
        let mut registry = Self::new();
        registry.add_window(BrowserWindow::new(1, vec![Tab::active(1, url)]));
        registry
    }

    /// Add a window; it becomes the last-focused one.
    pub fn add_window(&mut self, window: BrowserWindow) {
        self.focus_order.retain(|&id| id != window.id);
        self.focus_order.push(window.id);
        self.windows.retain(|w| w.id != window.id);
        self.windows.push(window);
    }

    /// Mark a window as last-focused. Returns false for unknown windows.
    pub fn focus_window(&mut self, id: u32) -> bool {
        if !self.windows.iter().any(|w| w.id == id) {
            return false;
        }
        self.focus_order.retain(|&other| other != id);
        self.focus_order.push(id);
        true
    }

    /// Remove a window and its focus-history entry.
    pub fn close_window(&mut self, id: u32) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.id != id);
        self.focus_order.retain(|&other| other != id);
        self.windows.len() != before
    }

    /// Make one tab of a window the active tab, deactivating its siblings.
    pub fn activate_tab(&mut self, window_id: u32, tab_id: u32) -> bool {
        let Some(window) = self.windows.iter_mut().find(|w| w.id == window_id) else {
            return false;
        };
        if !window.tabs.iter().any(|t| t.id == tab_id) {
            return false;
        }
        for tab in &mut window.tabs {
            tab.active = tab.id == tab_id;
        }
        true
    }

    /// Point a tab at a new URL.
    pub fn navigate(&mut self, window_id: u32, tab_id: u32, url: &str) -> bool {
        let Some(window) = self.windows.iter_mut().find(|w| w.id == window_id) else {
            return false;
        };
        let Some(tab) = window.tabs.iter_mut().find(|t| t.id == tab_id) else {
            return false;
        };
        tab.url = url.to_string();
        true
    }

    /// The last-focused window, if any window is open.
    pub fn last_focused(&self) -> Option<&BrowserWindow> {
        let id = *self.focus_order.last()?;
        self.windows.iter().find(|w| w.id == id)
    }

    /// URL of the active tab in the last-focused window.
    pub fn active_tab_url(&self) -> Option<String> {
        self.last_focused()
            .and_then(|window| window.active_tab())
            .map(|tab| tab.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_has_no_active_url() {
        assert_eq!(TabRegistry::new().active_tab_url(), None);
    }

    #[test]
    fn test_single_window_active_url() {
        let registry = TabRegistry::single_window("https://example.org/page");
        assert_eq!(
            registry.active_tab_url().as_deref(),
            Some("https://example.org/page")
        );
    }

    #[test]
    fn test_last_focused_window_wins() {
        let mut registry = TabRegistry::new();
        registry.add_window(BrowserWindow::new(1, vec![Tab::active(1, "https://a.test")]));
        registry.add_window(BrowserWindow::new(2, vec![Tab::active(2, "https://b.test")]));
        assert_eq!(registry.active_tab_url().as_deref(), Some("https://b.test"));

        assert!(registry.focus_window(1));
        assert_eq!(registry.active_tab_url().as_deref(), Some("https://a.test"));
    }

    #[test]
    fn test_window_without_active_tab_yields_none() {
        let mut registry = TabRegistry::new();
        registry.add_window(BrowserWindow::new(1, vec![Tab::new(1, "https://a.test")]));
        assert_eq!(registry.active_tab_url(), None);
    }

    #[test]
    fn test_activate_tab_switches_active_url() {
        let mut registry = TabRegistry::new();
        registry.add_window(BrowserWindow::new(
            1,
            vec![Tab::active(1, "https://a.test"), Tab::new(2, "https://b.test")],
        ));
        assert!(registry.activate_tab(1, 2));
        assert_eq!(registry.active_tab_url().as_deref(), Some("https://b.test"));

        let window = registry.last_focused().unwrap();
        assert_eq!(window.tabs.iter().filter(|t| t.active).count(), 1);
    }

    #[test]
    fn test_navigate_updates_url() {
        let mut registry = TabRegistry::single_window("https://old.test");
        assert!(registry.navigate(1, 1, "https://new.test"));
        assert_eq!(registry.active_tab_url().as_deref(), Some("https://new.test"));
    }

    #[test]
    fn test_close_window_falls_back_to_previous_focus() {
        let mut registry = TabRegistry::new();
        registry.add_window(BrowserWindow::new(1, vec![Tab::active(1, "https://a.test")]));
        registry.add_window(BrowserWindow::new(2, vec![Tab::active(2, "https://b.test")]));
        assert!(registry.close_window(2));
        assert_eq!(registry.active_tab_url().as_deref(), Some("https://a.test"));
    }
}
