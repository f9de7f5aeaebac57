use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::DecisionStatus;
use crate::event::ScopeLabels;

/// A recorded authoritative choice (§3). Retrieval precedence: policy(4) >
/// project(3) > user(2) > session(1), computed from `labels.scope`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub decision_id: String,
    pub tenant_id: String,
    pub ts: DateTime<Utc>,
    pub decision: String,
    pub rationale: Vec<String>,
    pub status: DecisionStatus,
    pub refs: Vec<String>,
    pub labels: ScopeLabels,
}

/// Precedence for a decision's `scope` label (§3, §4.E rule 4). Unknown or
/// absent scopes sort below every named tier.
pub fn scope_precedence(scope: Option<&str>) -> i32 {
    match scope {
        Some("policy") => 4,
        Some("project") => 3,
        Some("user") => 2,
        Some("session") => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precedence_ordering_matches_spec() {
        assert_eq!(scope_precedence(Some("policy")), 4);
        assert_eq!(scope_precedence(Some("project")), 3);
        assert_eq!(scope_precedence(Some("user")), 2);
        assert_eq!(scope_precedence(Some("session")), 1);
    }

    #[test]
    fn unknown_scope_has_lowest_precedence() {
        assert_eq!(scope_precedence(Some("nonsense")), 0);
        assert_eq!(scope_precedence(None), 0);
    }
}
