use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::enums::{ActorType, Channel, EventKind, Sensitivity};
use crate::error::{FieldError, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    #[serde(rename = "type")]
    pub actor_type: ActorType,
    pub id: String,
}

/// Orthogonal filter labels propagated verbatim from event to chunk (§9:
/// nullable, not sentinel — missing and explicit-null are treated the same).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScopeLabels {
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Client-supplied input to `recordEvent` (§4.D). `content` stays a raw JSON
/// value until validated against `kind` via [`crate::content::EventContent`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInput {
    pub tenant_id: String,
    pub session_id: String,
    pub channel: String,
    pub actor: Actor,
    pub kind: String,
    #[serde(default)]
    pub sensitivity: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: Value,
    #[serde(default)]
    pub refs: Vec<String>,
    #[serde(flatten)]
    pub labels: ScopeLabels,
}

impl EventInput {
    /// Validates required fields and enum values, returning the parsed
    /// `(channel, kind, sensitivity)` triple on success (§7 Validation).
    pub fn validate(&self) -> Result<(Channel, EventKind, Sensitivity), ValidationError> {
        let mut errs = Vec::new();

        if self.tenant_id.trim().is_empty() {
            errs.push(FieldError::new("tenant_id", "must not be empty"));
        }
        if self.session_id.trim().is_empty() {
            errs.push(FieldError::new("session_id", "must not be empty"));
        }
        if self.actor.id.trim().is_empty() {
            errs.push(FieldError::new("actor.id", "must not be empty"));
        }

        let channel = Channel::parse(&self.channel);
        if channel.is_none() {
            errs.push(FieldError::new(
                "channel",
                format!("invalid channel: {}", self.channel),
            ));
        }

        let kind = parse_event_kind(&self.kind);
        if kind.is_none() {
            errs.push(FieldError::new(
                "kind",
                format!("invalid kind: {}", self.kind),
            ));
        }

        let sensitivity = match self.sensitivity.as_deref() {
            None => Some(Sensitivity::None),
            Some(s) => parse_sensitivity(s).or_else(|| {
                errs.push(FieldError::new(
                    "sensitivity",
                    format!("invalid sensitivity: {s}"),
                ));
                None
            }),
        };

        if !errs.is_empty() {
            return Err(ValidationError(errs));
        }

        Ok((channel.unwrap(), kind.unwrap(), sensitivity.unwrap()))
    }
}

pub fn parse_event_kind(s: &str) -> Option<EventKind> {
    Some(match s {
        "message" => EventKind::Message,
        "tool_call" => EventKind::ToolCall,
        "tool_result" => EventKind::ToolResult,
        "decision" => EventKind::Decision,
        "task_update" => EventKind::TaskUpdate,
        "artifact" => EventKind::Artifact,
        _ => return None,
    })
}

pub fn parse_sensitivity(s: &str) -> Option<Sensitivity> {
    Some(match s {
        "none" => Sensitivity::None,
        "low" => Sensitivity::Low,
        "high" => Sensitivity::High,
        "secret" => Sensitivity::Secret,
        _ => return None,
    })
}

/// The persisted, immutable event record (§3). Never mutated after commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: String,
    pub tenant_id: String,
    pub session_id: String,
    pub channel: Channel,
    pub actor: Actor,
    pub kind: EventKind,
    pub sensitivity: Sensitivity,
    pub tags: Vec<String>,
    pub content: Value,
    pub refs: Vec<String>,
    pub labels: ScopeLabels,
    pub ts: DateTime<Utc>,
}
