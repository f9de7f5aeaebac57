use serde::{Deserialize, Serialize};

/// A tenant-wide behavioral constraint packed into the ACB `rules` section
/// (§3, §4.H step 3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub rule_id: String,
    pub tenant_id: String,
    pub content: String,
    pub scope: Option<String>,
    /// Specific channel, or the literal wildcard `"all"`.
    pub channel: String,
    pub priority: i32,
    pub token_est: i32,
}

impl Rule {
    /// Whether this rule applies to requests on `channel` (§4.H step 3).
    pub fn applies_to_channel(&self, channel: &str) -> bool {
        self.channel == channel || self.channel == "all"
    }
}
