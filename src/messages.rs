//! Typed message envelope for the background broker
//!
//! Requests and responses cross a process-like boundary, so both sides agree
//! on an explicit wire shape: `{"type": "GET_TAB_URL"}` in, `{"url": ...}` out.

use serde::{Deserialize, Serialize};

/// Request sent to the background broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    /// Ask for the URL of the active tab in the last-focused window.
    #[serde(rename = "GET_TAB_URL")]
    GetTabUrl,
    /// Install or remove the mobile-view header rewrite rule.
    #[serde(rename = "TOGGLE_MOBILE_VIEW")]
    ToggleMobileView { enabled: bool },
}

/// Answer to [`Message::GetTabUrl`].
///
/// `url` is `None` whether there is no active tab, the query lacked
/// permission, or the query failed outright - callers never need to tell
/// those apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabUrlResponse {
    pub url: Option<String>,
}

/// Answer to [`Message::ToggleMobileView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
}

/// All broker responses, matched by request type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    TabUrl(TabUrlResponse),
    Toggle(ToggleResponse),
}
