// Core enumerations shared across entities (§3).
use serde::{Deserialize, Serialize};

/// Delivery channel an event/chunk was recorded on. Controls sensitivity
/// admissibility via `Channel::allowed_sensitivity` in `memoryd-core`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Private,
    Public,
    Team,
    Agent,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Private => "private",
            Channel::Public => "public",
            Channel::Team => "team",
            Channel::Agent => "agent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Channel::Private),
            "public" => Some(Channel::Public),
            "team" => Some(Channel::Team),
            "agent" => Some(Channel::Agent),
            _ => None,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorType {
    Human,
    Agent,
    Tool,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Human => "human",
            ActorType::Agent => "agent",
            ActorType::Tool => "tool",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "human" => Some(ActorType::Human),
            "agent" => Some(ActorType::Agent),
            "tool" => Some(ActorType::Tool),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Message,
    ToolCall,
    ToolResult,
    Decision,
    TaskUpdate,
    Artifact,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Message => "message",
            EventKind::ToolCall => "tool_call",
            EventKind::ToolResult => "tool_result",
            EventKind::Decision => "decision",
            EventKind::TaskUpdate => "task_update",
            EventKind::Artifact => "artifact",
        }
    }
}

/// Sensitivity tier. Ordered least → most sensitive for comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    None,
    Low,
    High,
    Secret,
}

impl Sensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sensitivity::None => "none",
            Sensitivity::Low => "low",
            Sensitivity::High => "high",
            Sensitivity::Secret => "secret",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Active,
    Superseded,
    Revoked,
}

impl DecisionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionStatus::Active => "active",
            DecisionStatus::Superseded => "superseded",
            DecisionStatus::Revoked => "revoked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(DecisionStatus::Active),
            "superseded" => Some(DecisionStatus::Superseded),
            "revoked" => Some(DecisionStatus::Revoked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Doing,
    Done,
    Closed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
            TaskStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(TaskStatus::Open),
            "doing" => Some(TaskStatus::Doing),
            "done" => Some(TaskStatus::Done),
            "closed" => Some(TaskStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditTargetType {
    Chunk,
    Decision,
}

impl EditTargetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditTargetType::Chunk => "chunk",
            EditTargetType::Decision => "decision",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chunk" => Some(EditTargetType::Chunk),
            "decision" => Some(EditTargetType::Decision),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditOp {
    Retract,
    Amend,
    Quarantine,
    Attenuate,
    Block,
}

impl EditOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditOp::Retract => "retract",
            EditOp::Amend => "amend",
            EditOp::Quarantine => "quarantine",
            EditOp::Attenuate => "attenuate",
            EditOp::Block => "block",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "retract" => Some(EditOp::Retract),
            "amend" => Some(EditOp::Amend),
            "quarantine" => Some(EditOp::Quarantine),
            "attenuate" => Some(EditOp::Attenuate),
            "block" => Some(EditOp::Block),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditStatus {
    Proposed,
    Approved,
    Rejected,
}

impl EditStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditStatus::Proposed => "proposed",
            EditStatus::Approved => "approved",
            EditStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "proposed" => Some(EditStatus::Proposed),
            "approved" => Some(EditStatus::Approved),
            "rejected" => Some(EditStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsuleScope {
    Session,
    User,
    Project,
    Policy,
    Global,
}

impl CapsuleScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapsuleScope::Session => "session",
            CapsuleScope::User => "user",
            CapsuleScope::Project => "project",
            CapsuleScope::Policy => "policy",
            CapsuleScope::Global => "global",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "session" => Some(CapsuleScope::Session),
            "user" => Some(CapsuleScope::User),
            "project" => Some(CapsuleScope::Project),
            "policy" => Some(CapsuleScope::Policy),
            "global" => Some(CapsuleScope::Global),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapsuleStatus {
    Active,
    Revoked,
    Expired,
}

impl CapsuleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapsuleStatus::Active => "active",
            CapsuleStatus::Revoked => "revoked",
            CapsuleStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CapsuleStatus::Active),
            "revoked" => Some(CapsuleStatus::Revoked),
            "expired" => Some(CapsuleStatus::Expired),
            _ => None,
        }
    }
}

/// Directed traversal sense used by `memoryd-graph::traverse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    Outgoing,
    Incoming,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_type_str_round_trips() {
        for t in [ActorType::Human, ActorType::Agent, ActorType::Tool] {
            assert_eq!(ActorType::parse(t.as_str()), Some(t));
        }
    }

    #[test]
    fn decision_status_str_round_trips() {
        for s in [
            DecisionStatus::Active,
            DecisionStatus::Superseded,
            DecisionStatus::Revoked,
        ] {
            assert_eq!(DecisionStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn task_status_str_round_trips() {
        for s in [
            TaskStatus::Open,
            TaskStatus::Doing,
            TaskStatus::Done,
            TaskStatus::Closed,
        ] {
            assert_eq!(TaskStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn edit_op_str_round_trips() {
        for op in [
            EditOp::Retract,
            EditOp::Amend,
            EditOp::Quarantine,
            EditOp::Attenuate,
            EditOp::Block,
        ] {
            assert_eq!(EditOp::parse(op.as_str()), Some(op));
        }
    }

    #[test]
    fn edit_status_str_round_trips() {
        for s in [EditStatus::Proposed, EditStatus::Approved, EditStatus::Rejected] {
            assert_eq!(EditStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn capsule_scope_str_round_trips() {
        for s in [
            CapsuleScope::Session,
            CapsuleScope::User,
            CapsuleScope::Project,
            CapsuleScope::Policy,
            CapsuleScope::Global,
        ] {
            assert_eq!(CapsuleScope::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn capsule_status_str_round_trips() {
        for s in [CapsuleStatus::Active, CapsuleStatus::Revoked, CapsuleStatus::Expired] {
            assert_eq!(CapsuleStatus::parse(s.as_str()), Some(s));
        }
    }

    #[test]
    fn unknown_strings_parse_to_none() {
        assert_eq!(ActorType::parse("nope"), None);
        assert_eq!(DecisionStatus::parse("nope"), None);
        assert_eq!(TaskStatus::parse("nope"), None);
        assert_eq!(EditOp::parse("nope"), None);
        assert_eq!(EditStatus::parse("nope"), None);
        assert_eq!(CapsuleScope::parse("nope"), None);
        assert_eq!(CapsuleStatus::parse("nope"), None);
    }
}
