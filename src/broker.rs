//! Background broker answering typed requests from page-side code.
//!
//! Page-side code cannot touch tab state directly, so it sends a
//! [`Message`](crate::messages::Message) through a [`BrokerHandle`] and waits
//! for the reply. The broker runs on its own thread, owns the request loop,
//! and always answers: internal failures degrade to `url: null` or
//! `success: false` instead of an error the caller would have to handle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use crate::messages::{Message, Response, TabUrlResponse, ToggleResponse};
use crate::rewrite::DynamicRules;
use crate::tabs::TabRegistry;

/// Counters for requests the broker has served.
#[derive(Debug, Default)]
pub struct BrokerStats {
    tab_url_requests: AtomicU64,
    toggle_requests: AtomicU64,
}

impl BrokerStats {
    pub fn tab_url_requests(&self) -> u64 {
        self.tab_url_requests.load(Ordering::Relaxed)
    }

    pub fn toggle_requests(&self) -> u64 {
        self.toggle_requests.load(Ordering::Relaxed)
    }
}

struct Envelope {
    message: Message,
    reply: mpsc::Sender<Response>,
}

enum BrokerCommand {
    Request(Envelope),
    Shutdown,
}

/// Client end of the broker channel. Cloneable; one per requester.
#[derive(Clone)]
pub struct BrokerHandle {
    tx: mpsc::Sender<BrokerCommand>,
}

impl BrokerHandle {
    /// One request/response round trip.
    ///
    /// Returns `None` on transport failure (broker shut down before or during
    /// the request). Never panics, never blocks indefinitely once the broker
    /// is gone: queued envelopes are dropped with the channel, which wakes the
    /// waiting receiver.
    pub fn request(&self, message: Message) -> Option<Response> {
        let (reply_tx, reply_rx) = mpsc::channel();
        let envelope = Envelope {
            message,
            reply: reply_tx,
        };
        if self.tx.send(BrokerCommand::Request(envelope)).is_err() {
            tracing::debug!("broker channel closed; request dropped");
            return None;
        }
        reply_rx.recv().ok()
    }
}

/// Owner of the broker worker thread.
///
/// Dropping the `Broker` tells the worker to stop; requests sent after that
/// resolve to `None` at the handle.
pub struct Broker {
    tx: mpsc::Sender<BrokerCommand>,
    stats: Arc<BrokerStats>,
}

impl Broker {
    /// Spawn the request loop over shared tab and rule state.
    pub fn spawn(registry: Arc<Mutex<TabRegistry>>, rules: Arc<Mutex<DynamicRules>>) -> Self {
        let (tx, rx) = mpsc::channel::<BrokerCommand>();
        let stats = Arc::new(BrokerStats::default());
        let worker_stats = Arc::clone(&stats);

        thread::spawn(move || {
            while let Ok(command) = rx.recv() {
                let envelope = match command {
                    BrokerCommand::Request(envelope) => envelope,
                    BrokerCommand::Shutdown => break,
                };
                let response = serve(&registry, &rules, &worker_stats, envelope.message);
                // The requester may have given up; a closed reply channel is
                // not an error.
                let _ = envelope.reply.send(response);
            }
            tracing::debug!("broker worker stopped");
        });

        Self { tx, stats }
    }

    pub fn handle(&self) -> BrokerHandle {
        BrokerHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn stats(&self) -> Arc<BrokerStats> {
        Arc::clone(&self.stats)
    }
}

impl Drop for Broker {
    fn drop(&mut self) {
        let _ = self.tx.send(BrokerCommand::Shutdown);
    }
}

fn serve(
    registry: &Mutex<TabRegistry>,
    rules: &Mutex<DynamicRules>,
    stats: &BrokerStats,
    message: Message,
) -> Response {
    match message {
        Message::GetTabUrl => {
            stats.tab_url_requests.fetch_add(1, Ordering::Relaxed);
            let url = match registry.lock() {
                Ok(registry) => registry.active_tab_url(),
                Err(e) => {
                    // Query failure must still resolve the response.
                    tracing::error!("tab registry unavailable: {e}");
                    None
                }
            };
            tracing::trace!(?url, "answering GET_TAB_URL");
            Response::TabUrl(TabUrlResponse { url })
        }
        Message::ToggleMobileView { enabled } => {
            stats.toggle_requests.fetch_add(1, Ordering::Relaxed);
            let success = match rules.lock() {
                Ok(mut rules) => {
                    rules.set_mobile_view(enabled);
                    true
                }
                Err(e) => {
                    tracing::error!("rewrite rules unavailable: {e}");
                    false
                }
            };
            Response::Toggle(ToggleResponse { success })
        }
    }
}
