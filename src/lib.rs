//! tabdock - core engine for a pinned-site browser side panel.
//!
//! Implements the pieces with actual behavior behind the panel UI: the
//! trigger replacement engine (type `@tab` + space or Tab, get the active
//! tab's URL spliced in), the background broker it talks to, and the synced
//! state store with its change notifications.

pub mod broker;
pub mod cli;
pub mod config_paths;
pub mod dispatch;
pub mod engine;
pub mod field;
pub mod messages;
pub mod resolver;
pub mod rewrite;
pub mod store;
pub mod store_watcher;
pub mod tabs;
pub mod tracing;
pub mod trigger;

// Re-export commonly used types
pub use broker::{Broker, BrokerHandle};
pub use dispatch::{EventDispatcher, Key, KeyDisposition};
pub use engine::{ActivationSuffix, ReplacementEngine};
pub use field::{EditableField, FieldEvent, PlainField, RichField, RichNode};
pub use resolver::TabUrlResolver;
pub use store::{AppState, PinnedSite, StoreChange, SyncStore};
pub use store_watcher::StoreWatcher;
pub use tabs::{BrowserWindow, Tab, TabRegistry};
pub use trigger::{validate_trigger, TriggerStore, DEFAULT_TRIGGER};
