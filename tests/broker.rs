//! Background broker tests - tab queries, rule toggling, transport failure

mod common;

use std::sync::{Arc, Mutex};

use common::{broker_with_registry, broker_with_tab, broker_without_tabs};
use tabdock::broker::Broker;
use tabdock::messages::{Message, Response};
use tabdock::resolver::TabUrlResolver;
use tabdock::rewrite::{DynamicRules, MOBILE_RULE_ID};
use tabdock::tabs::{BrowserWindow, Tab, TabRegistry};

#[test]
fn test_resolves_active_tab_url() {
    let broker = broker_with_tab("https://example.org/page");
    let resolver = TabUrlResolver::new(broker.handle());
    assert_eq!(
        resolver.resolve_active_tab_url().as_deref(),
        Some("https://example.org/page")
    );
}

#[test]
fn test_last_focused_window_answers() {
    let mut registry = TabRegistry::new();
    registry.add_window(BrowserWindow::new(1, vec![Tab::active(1, "https://a.test")]));
    registry.add_window(BrowserWindow::new(2, vec![Tab::active(2, "https://b.test")]));
    registry.focus_window(1);

    let broker = broker_with_registry(registry);
    let resolver = TabUrlResolver::new(broker.handle());
    assert_eq!(resolver.resolve_active_tab_url().as_deref(), Some("https://a.test"));
}

#[test]
fn test_no_windows_resolves_null_not_error() {
    let broker = broker_without_tabs();

    // The broker still answers; the response carries url: null.
    let response = broker.handle().request(Message::GetTabUrl);
    match response {
        Some(Response::TabUrl(tab_url)) => assert_eq!(tab_url.url, None),
        other => panic!("expected a TabUrl response, got {other:?}"),
    }
}

#[test]
fn test_registry_mutations_are_visible_to_broker() {
    let registry = Arc::new(Mutex::new(TabRegistry::single_window("https://old.test")));
    let rules = Arc::new(Mutex::new(DynamicRules::default()));
    let broker = Broker::spawn(Arc::clone(&registry), rules);
    let resolver = TabUrlResolver::new(broker.handle());

    assert_eq!(resolver.resolve_active_tab_url().as_deref(), Some("https://old.test"));

    registry.lock().unwrap().navigate(1, 1, "https://new.test");
    assert_eq!(resolver.resolve_active_tab_url().as_deref(), Some("https://new.test"));
}

#[test]
fn test_toggle_mobile_view_installs_and_removes_rule() {
    let registry = Arc::new(Mutex::new(TabRegistry::new()));
    let rules = Arc::new(Mutex::new(DynamicRules::default()));
    let broker = Broker::spawn(registry, Arc::clone(&rules));
    let handle = broker.handle();

    let response = handle.request(Message::ToggleMobileView { enabled: true });
    match response {
        Some(Response::Toggle(toggle)) => assert!(toggle.success),
        other => panic!("expected a Toggle response, got {other:?}"),
    }
    {
        let rules = rules.lock().unwrap();
        assert!(rules.is_mobile_view_active());
        assert!(rules.rule(MOBILE_RULE_ID).is_some());
    }

    handle.request(Message::ToggleMobileView { enabled: false });
    assert!(!rules.lock().unwrap().is_mobile_view_active());
}

#[test]
fn test_request_after_shutdown_returns_none() {
    let handle = {
        let broker = broker_with_tab("https://a.test");
        broker.handle()
    };

    assert_eq!(handle.request(Message::GetTabUrl), None);

    let resolver = TabUrlResolver::new(handle);
    assert_eq!(resolver.resolve_active_tab_url(), None);
}

#[test]
fn test_handles_are_cloneable_and_independent() {
    let broker = broker_with_tab("https://a.test");
    let first = broker.handle();
    let second = first.clone();

    assert!(first.request(Message::GetTabUrl).is_some());
    assert!(second.request(Message::GetTabUrl).is_some());
    assert_eq!(broker.stats().tab_url_requests(), 2);
}
