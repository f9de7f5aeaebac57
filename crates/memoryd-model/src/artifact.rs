use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Oversize blob offloaded out of an event's inline content (§3, §4.D).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub artifact_id: String,
    pub tenant_id: String,
    pub kind: String,
    pub bytes: Vec<u8>,
    pub meta: Value,
    pub refs: Vec<String>,
}

/// Oversize-payload threshold: tool_result excerpt text over this many UTF-8
/// bytes is offloaded to an `Artifact` (§3, §6 bit-exact formats).
pub const ARTIFACT_THRESHOLD_BYTES: usize = 64 * 1024;
