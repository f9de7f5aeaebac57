//! Entity types for the memoryd agent memory service (spec §3).
//!
//! Pure data definitions only — no I/O, no persistence. `memoryd-store`
//! maps these to rows; `memoryd-core` operates on them; every other crate
//! builds on top.
mod artifact;
mod capsule;
mod chunk;
mod content;
mod decision;
mod edge;
mod edit;
mod enums;
mod error;
mod event;
mod rule;
mod task;

pub use artifact::{Artifact, ARTIFACT_THRESHOLD_BYTES};
pub use capsule::{Capsule, CapsuleItems};
pub use chunk::Chunk;
pub use content::{
    ArtifactContent, DecisionContent, EventContent, MessageContent, TaskUpdateContent,
    ToolCallContent, ToolResultContent,
};
pub use decision::{scope_precedence, Decision};
pub use edge::{Edge, DEPENDS_ON};
pub use edit::{EditPatch, MemoryEdit};
pub use enums::{
    ActorType, CapsuleScope, CapsuleStatus, Channel, DecisionStatus, EdgeDirection, EditOp,
    EditStatus, EditTargetType, EventKind, Sensitivity, TaskStatus,
};
pub use error::{FieldError, ValidationError};
pub use event::{parse_event_kind, parse_sensitivity, Actor, Event, EventInput, ScopeLabels};
pub use rule::Rule;
pub use task::Task;
