use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;

use tabdock::cli::{CliArgs, Gesture};
use tabdock::dispatch::{EventDispatcher, Key};
use tabdock::engine::ReplacementEngine;
use tabdock::field::PlainField;
use tabdock::messages::Message;
use tabdock::resolver::TabUrlResolver;
use tabdock::rewrite::DynamicRules;
use tabdock::store::SyncStore;
use tabdock::tabs::TabRegistry;
use tabdock::trigger::TriggerStore;
use tabdock::Broker;

fn main() -> anyhow::Result<()> {
    tabdock::tracing::init();
    let args = CliArgs::parse();

    let store = match args.state {
        Some(path) => SyncStore::open(path),
        None => SyncStore::open_default().context("no config directory available")?,
    };

    let registry = match &args.tab_url {
        Some(url) => TabRegistry::single_window(url),
        None => TabRegistry::new(),
    };
    let registry = Arc::new(Mutex::new(registry));
    let rules = Arc::new(Mutex::new(DynamicRules::default()));
    let broker = Broker::spawn(registry, rules);

    // Sync the mobile-view rule with the persisted preference on startup.
    let _ = broker.handle().request(Message::ToggleMobileView {
        enabled: store.state().use_mobile_view,
    });

    let trigger = TriggerStore::new(store.tab_trigger());
    let resolver = TabUrlResolver::new(broker.handle());
    let dispatcher = EventDispatcher::new(ReplacementEngine::new(trigger, resolver));

    let mut field = PlainField::new(&args.text);
    let replaced = match args.gesture {
        Gesture::Space => {
            field.type_char(' ');
            dispatcher.on_input(&mut field)
        }
        Gesture::Tab => {
            dispatcher
                .on_keydown(&Key::Tab, &mut field)
                .prevent_default
        }
    };

    println!("{}", field.value());
    if !replaced {
        tracing::info!("no replacement occurred");
    }
    Ok(())
}
