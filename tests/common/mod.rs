//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use tabdock::broker::Broker;
use tabdock::dispatch::EventDispatcher;
use tabdock::engine::ReplacementEngine;
use tabdock::resolver::TabUrlResolver;
use tabdock::rewrite::DynamicRules;
use tabdock::tabs::TabRegistry;
use tabdock::trigger::TriggerStore;

/// Broker backed by one window holding a single active tab at `url`.
pub fn broker_with_tab(url: &str) -> Broker {
    broker_with_registry(TabRegistry::single_window(url))
}

/// Broker with no windows at all; GET_TAB_URL answers null.
pub fn broker_without_tabs() -> Broker {
    broker_with_registry(TabRegistry::new())
}

pub fn broker_with_registry(registry: TabRegistry) -> Broker {
    Broker::spawn(
        Arc::new(Mutex::new(registry)),
        Arc::new(Mutex::new(DynamicRules::default())),
    )
}

/// Dispatcher wired to a broker, using the default `@tab` trigger.
pub fn dispatcher(broker: &Broker) -> EventDispatcher {
    dispatcher_with_trigger(broker, "@tab")
}

pub fn dispatcher_with_trigger(broker: &Broker, trigger: &str) -> EventDispatcher {
    let engine = ReplacementEngine::new(
        TriggerStore::new(trigger),
        TabUrlResolver::new(broker.handle()),
    );
    EventDispatcher::new(engine)
}
