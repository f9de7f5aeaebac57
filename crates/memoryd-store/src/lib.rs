//! Postgres-backed persistence for memoryd (§3, §4).
//!
//! Every repository function is generic over `sqlx::PgExecutor<'c>` so
//! callers can pass a bare `&PgPool` for single-statement reads, or an open
//! `Transaction` to span several writes atomically — `memoryd-ingest` uses
//! the latter to persist an event, its chunk, and its artifact as one unit
//! (§4.D).
mod artifacts;
mod capsules;
mod chunks;
mod decisions;
mod edges;
mod edits;
mod error;
mod events;
mod pool;
mod rules;
mod tasks;

pub use artifacts::{get_artifact, insert_artifact};
pub use capsules::{
    get_capsule, insert_capsule, list_capsules, list_expired_active_capsules,
    update_capsule_status,
};
pub use chunks::{get_chunk, insert_chunk, list_chunks_by_event, list_chunks_by_tenant};
pub use decisions::{get_decision, insert_decision, list_decisions_by_status, update_decision_status};
pub use edges::{
    delete_edge, get_edge, insert_edge, list_edges_by_type, list_edges_for_node,
    update_edge_properties,
};
pub use edits::{
    get_edit, insert_edit, list_approved_edits, list_approved_edits_for_target, update_edit_status,
};
pub use error::{StoreError, StoreResult};
pub use events::{get_event, insert_event, list_recent_events_by_session};
pub use pool::{connect, migrate};
pub use rules::{get_rule, insert_rule, list_rules};
pub use tasks::{get_task, insert_task, list_tasks, update_task_status};
