//! Dynamic request-header rewrite rules.
//!
//! The only built-in rule spoofs a mobile browser for framed sites: when
//! mobile view is on, sub-frame requests carry an iPhone user agent and
//! matching client hints.

/// Rule id reserved for the mobile-view spoof.
pub const MOBILE_RULE_ID: u32 = 2;

const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 18_6 like Mac OS X) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/26.0 Mobile/15E148 Safari/604.1";
const MOBILE_SEC_CH_UA: &str =
    r#""Not.A/Brand";v="8", "Chromium";v="114", "Google Chrome";v="114""#;

/// Set a request header to a fixed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    pub header: String,
    pub value: String,
}

impl HeaderSet {
    fn new(header: &str, value: &str) -> Self {
        Self {
            header: header.to_string(),
            value: value.to_string(),
        }
    }
}

/// One dynamic rewrite rule applied to sub-frame requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRule {
    pub id: u32,
    pub priority: u32,
    pub request_headers: Vec<HeaderSet>,
}

/// The set of currently installed dynamic rules.
///
/// `update` removes before adding, so re-installing a rule under the same id
/// is idempotent.
#[derive(Debug, Clone, Default)]
pub struct DynamicRules {
    rules: Vec<HeaderRule>,
}

impl DynamicRules {
    /// Remove the listed rule ids, then install the given rules.
    pub fn update(&mut self, remove_ids: &[u32], add_rules: Vec<HeaderRule>) {
        self.rules.retain(|rule| !remove_ids.contains(&rule.id));
        self.rules.extend(add_rules);
    }

    /// Install or remove the mobile-view spoof rule.
    pub fn set_mobile_view(&mut self, enabled: bool) {
        if enabled {
            self.update(&[MOBILE_RULE_ID], vec![Self::mobile_rule()]);
            tracing::debug!("mobile view rule installed");
        } else {
            self.update(&[MOBILE_RULE_ID], Vec::new());
            tracing::debug!("mobile view rule removed");
        }
    }

    pub fn rule(&self, id: u32) -> Option<&HeaderRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn is_mobile_view_active(&self) -> bool {
        self.rule(MOBILE_RULE_ID).is_some()
    }

    fn mobile_rule() -> HeaderRule {
        HeaderRule {
            id: MOBILE_RULE_ID,
            priority: 2,
            request_headers: vec![
                HeaderSet::new("User-Agent", MOBILE_USER_AGENT),
                HeaderSet::new("Sec-CH-UA", MOBILE_SEC_CH_UA),
                HeaderSet::new("Sec-CH-UA-Mobile", "?1"),
                HeaderSet::new("Sec-CH-UA-Platform", "\"iOS\""),
            ],
        }
    }
}
