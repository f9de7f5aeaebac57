use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::CapsuleStatus;

/// The memory references a capsule curates, grouped by item kind (§3).
/// A capsule references these without owning them: revocation never
/// removes the referenced items.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapsuleItems {
    #[serde(default)]
    pub chunks: BTreeSet<String>,
    #[serde(default)]
    pub decisions: BTreeSet<String>,
    #[serde(default)]
    pub artifacts: BTreeSet<String>,
}

impl CapsuleItems {
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty() && self.decisions.is_empty() && self.artifacts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunks.len() + self.decisions.len() + self.artifacts.len()
    }
}

/// Curated, audience-scoped, time-bounded bundle of memory references (§3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capsule {
    pub capsule_id: String,
    pub tenant_id: String,
    pub scope: String,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub author_agent_id: String,
    pub audience_agent_ids: BTreeSet<String>,
    pub items: CapsuleItems,
    pub risks: Vec<String>,
    pub ttl_days: i32,
    pub status: CapsuleStatus,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Capsule {
    pub fn expires_at_from(created_at: DateTime<Utc>, ttl_days: i32) -> DateTime<Utc> {
        created_at + chrono::Duration::seconds(ttl_days as i64 * 86_400)
    }

    /// Whether reads must treat this capsule as unavailable (§4.F, §8:
    /// readers must check `expires_at` directly rather than rely on the
    /// sweeper, which only updates status for observability).
    pub fn is_unavailable(&self, now: DateTime<Utc>) -> bool {
        !matches!(self.status, CapsuleStatus::Active) || self.expires_at <= now
    }

    /// Whether `agent_id` may read this capsule: in its audience, or the
    /// author (§4.F `getCapsule`).
    pub fn is_visible_to(&self, agent_id: &str) -> bool {
        self.author_agent_id == agent_id || self.audience_agent_ids.contains(agent_id)
    }
}
