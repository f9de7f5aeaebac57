// Event content as a tagged variant keyed by `kind` (§9 Design Notes).
//
// Unknown fields are preserved opaquely in `extra` so they round-trip through
// storage even though the chunker never reads them.
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn is_null(v: &Value) -> bool {
    v.is_null()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageContent {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_null")]
    pub extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolCallContent {
    pub name: String,
    #[serde(default)]
    pub args: Value,
    #[serde(default, skip_serializing_if = "is_null")]
    pub extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ToolResultContent {
    pub excerpt_text: String,
    /// Path the tool result refers to, when applicable (used by the chunker
    /// to detect project-manifest results, §4.C step 3).
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub truncated: bool,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_null")]
    pub extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DecisionContent {
    pub decision: String,
    #[serde(default)]
    pub rationale: Vec<String>,
    #[serde(default, skip_serializing_if = "is_null")]
    pub extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskUpdateContent {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "is_null")]
    pub extra: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ArtifactContent {
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_null")]
    pub extra: Value,
}

/// Event content as a tagged variant keyed by the event's `kind`.
///
/// Serializes as the bare content object (no wrapper tag) so persisted rows
/// look exactly like the open-map shape `spec.md` describes. Deserialization
/// is driven explicitly by `kind` via [`EventContent::from_kind_and_value`]
/// rather than serde's untagged variant probing, since a raw JSON object
/// alone does not reliably disambiguate e.g. an empty `tool_call` from an
/// empty `artifact`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum EventContent {
    Message(MessageContent),
    ToolCall(ToolCallContent),
    ToolResult(ToolResultContent),
    Decision(DecisionContent),
    TaskUpdate(TaskUpdateContent),
    Artifact(ArtifactContent),
}

impl EventContent {
    /// Parse the wire/stored content object into the variant `kind` selects.
    pub fn from_kind_and_value(
        kind: super::EventKind,
        value: Value,
    ) -> Result<Self, serde_json::Error> {
        use super::EventKind::*;
        Ok(match kind {
            Message => EventContent::Message(serde_json::from_value(value)?),
            ToolCall => EventContent::ToolCall(serde_json::from_value(value)?),
            ToolResult => EventContent::ToolResult(serde_json::from_value(value)?),
            Decision => EventContent::Decision(serde_json::from_value(value)?),
            TaskUpdate => EventContent::TaskUpdate(serde_json::from_value(value)?),
            Artifact => EventContent::Artifact(serde_json::from_value(value)?),
        })
    }

    pub fn kind(&self) -> super::EventKind {
        use super::EventKind::*;
        match self {
            EventContent::Message(_) => Message,
            EventContent::ToolCall(_) => ToolCall,
            EventContent::ToolResult(_) => ToolResult,
            EventContent::Decision(_) => Decision,
            EventContent::TaskUpdate(_) => TaskUpdate,
            EventContent::Artifact(_) => Artifact,
        }
    }
    /// The text the chunker selects for this content (§4.C step 1).
    /// `None` for kinds the chunker never extracts text from (tool_call).
    pub fn chunk_source_text(&self) -> Option<String> {
        match self {
            EventContent::Message(m) => Some(m.text.clone()),
            EventContent::ToolResult(t) => Some(t.excerpt_text.clone()),
            EventContent::Decision(d) => {
                let mut lines = vec![d.decision.clone()];
                lines.extend(d.rationale.iter().cloned());
                Some(lines.join("\n"))
            }
            EventContent::TaskUpdate(t) => t.details.clone().or_else(|| t.title.clone()),
            EventContent::ToolCall(_) | EventContent::Artifact(_) => None,
        }
    }

    /// All string-valued leaves this content exposes, for secret scanning
    /// and in-place redaction (§4.B). Order matches the fields declared on
    /// each variant so redaction is deterministic.
    pub fn string_fields_mut(&mut self) -> Vec<&mut String> {
        match self {
            EventContent::Message(m) => vec![&mut m.text],
            EventContent::ToolCall(t) => vec![&mut t.name],
            EventContent::ToolResult(t) => {
                let mut v = vec![&mut t.excerpt_text];
                if let Some(p) = t.path.as_mut() {
                    v.push(p);
                }
                v
            }
            EventContent::Decision(d) => {
                let mut v = vec![&mut d.decision];
                v.extend(d.rationale.iter_mut());
                v
            }
            EventContent::TaskUpdate(t) => {
                let mut v = Vec::new();
                if let Some(title) = t.title.as_mut() {
                    v.push(title);
                }
                if let Some(details) = t.details.as_mut() {
                    v.push(details);
                }
                v
            }
            EventContent::Artifact(_) => Vec::new(),
        }
    }

    /// Every open-ended `Value` field this content carries (`extra` on
    /// every variant, plus `args` on `tool_call`) — the parts of the
    /// payload the chunker never reads but that still round-trip through
    /// storage. Secret scanning serializes the whole content (`contains_secrets`
    /// on the JSON string, §4.D step 4), so a secret hiding in one of these
    /// fields is still detected; redaction has to reach the same fields or
    /// it would be coerced to `sensitivity = secret` while leaking the
    /// secret verbatim.
    fn json_fields_mut(&mut self) -> Vec<&mut Value> {
        match self {
            EventContent::Message(m) => vec![&mut m.extra],
            EventContent::ToolCall(t) => vec![&mut t.args, &mut t.extra],
            EventContent::ToolResult(t) => vec![&mut t.extra],
            EventContent::Decision(d) => vec![&mut d.extra],
            EventContent::TaskUpdate(t) => vec![&mut t.extra],
            EventContent::Artifact(a) => vec![&mut a.extra],
        }
    }

    /// Redact every string leaf reachable from this content — the declared
    /// `String` fields `string_fields_mut` lists, and every string found
    /// while recursing through the open-ended `Value` fields (`args`,
    /// `extra`) — using `redact`. Called in place of `string_fields_mut`
    /// alone wherever a secret shape might hide in an untyped field (§4.B,
    /// §4.D step 4).
    pub fn redact_all_string_leaves(&mut self, redact: &impl Fn(&str) -> String) {
        for field in self.string_fields_mut() {
            *field = redact(field);
        }
        for value in self.json_fields_mut() {
            redact_value_strings(value, redact);
        }
    }
}

/// Recurse through a JSON `Value`, replacing every string leaf with
/// `redact(leaf)`. Object keys and non-string scalars are left untouched.
fn redact_value_strings(value: &mut Value, redact: &impl Fn(&str) -> String) {
    match value {
        Value::String(s) => *s = redact(s),
        Value::Array(items) => {
            for item in items {
                redact_value_strings(item, redact);
            }
        }
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                redact_value_strings(v, redact);
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_chunk_source_is_text() {
        let c = EventContent::Message(MessageContent {
            text: "hello".into(),
            extra: Value::Null,
        });
        assert_eq!(c.chunk_source_text(), Some("hello".into()));
    }

    #[test]
    fn tool_call_has_no_chunk_source() {
        let c = EventContent::ToolCall(ToolCallContent::default());
        assert_eq!(c.chunk_source_text(), None);
    }

    #[test]
    fn decision_joins_rationale_with_decision_text() {
        let c = EventContent::Decision(DecisionContent {
            decision: "use postgres".into(),
            rationale: vec!["ACID".into(), "team familiarity".into()],
            extra: Value::Null,
        });
        assert_eq!(
            c.chunk_source_text(),
            Some("use postgres\nACID\nteam familiarity".into())
        );
    }

    #[test]
    fn task_update_prefers_details_over_title() {
        let c = EventContent::TaskUpdate(TaskUpdateContent {
            title: Some("title".into()),
            details: Some("details".into()),
            extra: Value::Null,
        });
        assert_eq!(c.chunk_source_text(), Some("details".into()));
    }

    #[test]
    fn redact_all_string_leaves_reaches_tool_call_args() {
        let mut c = EventContent::ToolCall(ToolCallContent {
            name: "clean".into(),
            args: serde_json::json!({"flags": ["--secret", "sk-abcdefghijklmnopqrstuvwxyz"]}),
            extra: Value::Null,
        });
        c.redact_all_string_leaves(&|s| s.replace("sk-abcdefghijklmnopqrstuvwxyz", "[X]"));
        if let EventContent::ToolCall(t) = &c {
            assert_eq!(t.args["flags"][1], "[X]");
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn redact_all_string_leaves_reaches_nested_extra() {
        let mut c = EventContent::Decision(DecisionContent {
            decision: "use postgres".into(),
            rationale: vec!["ACID".into()],
            extra: serde_json::json!({"meta": {"author": "secret-squirrel"}}),
        });
        c.redact_all_string_leaves(&|s| s.replace("secret-squirrel", "[X]"));
        if let EventContent::Decision(d) = &c {
            assert_eq!(d.extra["meta"]["author"], "[X]");
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn redact_all_string_leaves_still_redacts_declared_string_fields() {
        let mut c = EventContent::Message(MessageContent {
            text: "secret-squirrel".into(),
            extra: Value::Null,
        });
        c.redact_all_string_leaves(&|s| s.replace("secret-squirrel", "[X]"));
        if let EventContent::Message(m) = &c {
            assert_eq!(m.text, "[X]");
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn task_update_falls_back_to_title() {
        let c = EventContent::TaskUpdate(TaskUpdateContent {
            title: Some("title only".into()),
            details: None,
            extra: Value::Null,
        });
        assert_eq!(c.chunk_source_text(), Some("title only".into()));
    }
}
