// Component C: Chunker (§4.C).
//
// Extracts searchable text from a typed event, scores its importance, and
// propagates scope/subject/project onto the resulting chunk. Current
// contract is one chunk per event; splitting large text into several
// chunks is left for a future extension.
use memoryd_model::{Chunk, Event, EventContent, EventKind, ScopeLabels};

use crate::ids::{estimate_tokens, generate_id, CHUNK_PREFIX};

const PINNED_TAG: &str = "pinned";
const MANIFEST_MARKERS: [&str; 5] =
    ["README", "package.json", "pyproject.toml", "Cargo.toml", "go.mod"];

/// Text the chunker extracts for a given content variant (§4.C step 1).
fn select_text(content: &EventContent) -> Option<String> {
    content.chunk_source_text()
}

/// Importance score for a chunk (§4.C step 3). Checked in the order the
/// spec lists: decision and task_update kinds first, then the `pinned`
/// tag, then the manifest-path heuristic for tool_result content.
fn compute_importance(content: &EventContent, tags: &[String]) -> f32 {
    match content {
        EventContent::Decision(_) => return 1.0,
        EventContent::TaskUpdate(_) => return 0.8,
        _ => {}
    }
    if tags.iter().any(|t| t == PINNED_TAG) {
        return 0.9;
    }
    if let EventContent::ToolResult(t) = content {
        if let Some(path) = &t.path {
            if MANIFEST_MARKERS.iter().any(|m| path.contains(m)) {
                return 0.7;
            }
        }
    }
    0.0
}

/// Run the chunker over one event. Returns zero or one chunk per the
/// current one-chunk-per-event contract (§4.C step 2/5).
pub fn chunk_event(event: &Event, content: &EventContent) -> Vec<Chunk> {
    let Some(text) = select_text(content) else {
        return Vec::new();
    };
    if text.trim().is_empty() {
        return Vec::new();
    }

    let importance = compute_importance(content, &event.tags);
    let token_est = estimate_tokens(&text);

    vec![Chunk {
        chunk_id: generate_id(CHUNK_PREFIX),
        tenant_id: event.tenant_id.clone(),
        event_id: event.event_id.clone(),
        ts: event.ts,
        kind: content.kind(),
        channel: event.channel,
        sensitivity: event.sensitivity,
        tags: event.tags.clone(),
        token_est,
        importance,
        text,
        labels: ScopeLabels {
            scope: event.labels.scope.clone(),
            subject_type: event.labels.subject_type.clone(),
            subject_id: event.labels.subject_id.clone(),
            project_id: event.labels.project_id.clone(),
        },
    }]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use memoryd_model::{
        Actor, ActorType, Channel, DecisionContent, MessageContent, Sensitivity,
        TaskUpdateContent, ToolCallContent, ToolResultContent,
    };

    use super::*;

    fn base_event(kind: EventKind) -> Event {
        Event {
            event_id: "evt_1".into(),
            tenant_id: "t1".into(),
            session_id: "s1".into(),
            channel: Channel::Private,
            actor: Actor {
                actor_type: ActorType::Human,
                id: "u1".into(),
            },
            kind,
            sensitivity: Sensitivity::None,
            tags: vec![],
            content: serde_json::Value::Null,
            refs: vec![],
            labels: ScopeLabels::default(),
            ts: Utc::now(),
        }
    }

    #[test]
    fn message_event_produces_one_chunk_with_its_text() {
        let event = base_event(EventKind::Message);
        let content = EventContent::Message(MessageContent {
            text: "let's use postgres".into(),
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "let's use postgres");
        assert!(chunks[0].token_est > 0);
    }

    #[test]
    fn tool_call_produces_no_chunks() {
        let event = base_event(EventKind::ToolCall);
        let content = EventContent::ToolCall(ToolCallContent {
            name: "grep".into(),
            args: serde_json::Value::Null,
            extra: serde_json::Value::Null,
        });
        assert!(chunk_event(&event, &content).is_empty());
    }

    #[test]
    fn whitespace_only_text_produces_no_chunks() {
        let event = base_event(EventKind::Message);
        let content = EventContent::Message(MessageContent {
            text: "   \n\t  ".into(),
            extra: serde_json::Value::Null,
        });
        assert!(chunk_event(&event, &content).is_empty());
    }

    #[test]
    fn decision_event_has_importance_one() {
        let event = base_event(EventKind::Decision);
        let content = EventContent::Decision(DecisionContent {
            decision: "use postgres".into(),
            rationale: vec!["acid".into()],
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_eq!(chunks[0].importance, 1.0);
    }

    #[test]
    fn task_update_event_has_importance_point_eight() {
        let event = base_event(EventKind::TaskUpdate);
        let content = EventContent::TaskUpdate(TaskUpdateContent {
            title: None,
            details: Some("wire up the retry loop".into()),
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_eq!(chunks[0].importance, 0.8);
    }

    #[test]
    fn pinned_tag_overrides_default_importance() {
        let mut event = base_event(EventKind::Message);
        event.tags = vec!["pinned".into()];
        let content = EventContent::Message(MessageContent {
            text: "remember this".into(),
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_eq!(chunks[0].importance, 0.9);
    }

    #[test]
    fn tool_result_on_manifest_path_gets_point_seven() {
        let event = base_event(EventKind::ToolResult);
        let content = EventContent::ToolResult(ToolResultContent {
            excerpt_text: "[dependencies]\nserde = \"1\"".into(),
            path: Some("crates/memoryd-core/Cargo.toml".into()),
            truncated: false,
            artifact_id: None,
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_eq!(chunks[0].importance, 0.7);
    }

    #[test]
    fn tool_result_on_unrelated_path_gets_zero_importance() {
        let event = base_event(EventKind::ToolResult);
        let content = EventContent::ToolResult(ToolResultContent {
            excerpt_text: "ok".into(),
            path: Some("src/main.rs".into()),
            truncated: false,
            artifact_id: None,
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_eq!(chunks[0].importance, 0.0);
    }

    #[test]
    fn chunk_propagates_scope_labels_from_event() {
        let mut event = base_event(EventKind::Message);
        event.labels = ScopeLabels {
            scope: Some("project".into()),
            subject_type: Some("repo".into()),
            subject_id: Some("memoryd".into()),
            project_id: Some("proj_1".into()),
        };
        let content = EventContent::Message(MessageContent {
            text: "hello".into(),
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_eq!(chunks[0].labels.project_id.as_deref(), Some("proj_1"));
        assert_eq!(chunks[0].labels.subject_id.as_deref(), Some("memoryd"));
    }

    #[test]
    fn chunk_id_is_generated_not_copied_from_event() {
        let event = base_event(EventKind::Message);
        let content = EventContent::Message(MessageContent {
            text: "hi".into(),
            extra: serde_json::Value::Null,
        });
        let chunks = chunk_event(&event, &content);
        assert_ne!(chunks[0].chunk_id, event.event_id);
        assert!(chunks[0].chunk_id.starts_with("chk_"));
    }
}
