//! Pure functions operating on `memoryd-model` types: ID generation and
//! token estimation (§4.A), privacy rules (§4.B), and the chunker (§4.C).
//! No I/O; every public function here is deterministic given its inputs.
mod chunker;
mod ids;
mod privacy;

pub use chunker::chunk_event;
pub use ids::{
    estimate_tokens, generate_id, generate_id_at, ACB_PREFIX, ARTIFACT_PREFIX, CAPSULE_PREFIX,
    CHUNK_PREFIX, DECISION_PREFIX, EDGE_PREFIX, EDIT_PREFIX, EVENT_PREFIX, RULE_PREFIX,
    TASK_PREFIX,
};
pub use privacy::{
    allowed_sensitivity, contains_secrets, is_sensitivity_allowed, redact_secrets,
    REDACTION_SENTINEL,
};
