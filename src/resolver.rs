//! Active-tab resolver: one read-only question, asked across the broker.

use crate::broker::BrokerHandle;
use crate::messages::{Message, Response, TabUrlResponse};

/// Asks the background broker for the active tab's URL.
///
/// Every failure mode - no active tab, no permission, broker gone, wrong
/// response shape - surfaces uniformly as `None`.
#[derive(Clone)]
pub struct TabUrlResolver {
    broker: BrokerHandle,
}

impl TabUrlResolver {
    pub fn new(broker: BrokerHandle) -> Self {
        Self { broker }
    }

    /// One round trip to the broker. Read-only; no side effects.
    pub fn resolve_active_tab_url(&self) -> Option<String> {
        match self.broker.request(Message::GetTabUrl) {
            Some(Response::TabUrl(TabUrlResponse { url })) => url,
            Some(other) => {
                tracing::debug!(?other, "unexpected response to GET_TAB_URL");
                None
            }
            None => None,
        }
    }
}
