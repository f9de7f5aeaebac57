use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{Channel, EventKind, Sensitivity};
use crate::event::ScopeLabels;

/// Searchable text extracted from an event (§3, §4.C). Never directly
/// mutated after creation — edits layer over it via `memoryd-overlay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub tenant_id: String,
    pub event_id: String,
    pub ts: DateTime<Utc>,
    pub kind: EventKind,
    pub channel: Channel,
    pub sensitivity: Sensitivity,
    pub tags: Vec<String>,
    pub token_est: i32,
    pub importance: f32,
    pub text: String,
    pub labels: ScopeLabels,
}
