use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A typed directed relation between memory nodes (§3, §4.J). Owned by
/// neither endpoint; deleting a node does not cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub edge_id: String,
    pub tenant_id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
    pub created_at: DateTime<Utc>,
}

/// Edge type requiring acyclicity (§3, §4.J).
pub const DEPENDS_ON: &str = "depends_on";
