// Artifact offload (§4.D step 3): a tool_result whose excerpt_text exceeds
// the 64 KiB UTF-8 byte threshold gets its full text moved into an
// Artifact row, with the event's own excerpt_text truncated to the
// threshold and marked `truncated`.
use memoryd_core::{generate_id, ARTIFACT_PREFIX};
use memoryd_model::{Artifact, ToolResultContent, ARTIFACT_THRESHOLD_BYTES};

/// If `content.excerpt_text` is over threshold, returns the `Artifact` to
/// persist alongside the event and mutates `content` in place to carry the
/// truncated excerpt plus `truncated`/`artifact_id`. Otherwise a no-op.
pub fn offload_if_oversize(tenant_id: &str, content: &mut ToolResultContent) -> Option<Artifact> {
    if content.excerpt_text.len() <= ARTIFACT_THRESHOLD_BYTES {
        return None;
    }
    let artifact_id = generate_id(ARTIFACT_PREFIX);
    let full_text = content.excerpt_text.clone();
    let artifact = Artifact {
        artifact_id: artifact_id.clone(),
        tenant_id: tenant_id.to_string(),
        kind: "tool_result_excerpt".to_string(),
        bytes: full_text.into_bytes(),
        meta: serde_json::json!({ "path": content.path }),
        refs: vec![],
    };
    content.excerpt_text = truncate_utf8(&content.excerpt_text, ARTIFACT_THRESHOLD_BYTES);
    content.truncated = true;
    content.artifact_id = Some(artifact_id);
    Some(artifact)
}

/// Truncate `s` to at most `max_bytes` UTF-8 bytes, never splitting a
/// multi-byte character.
fn truncate_utf8(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content_of(len: usize) -> ToolResultContent {
        ToolResultContent {
            excerpt_text: "a".repeat(len),
            path: Some("src/main.rs".into()),
            truncated: false,
            artifact_id: None,
            extra: serde_json::Value::Null,
        }
    }

    #[test]
    fn text_at_or_under_threshold_is_not_offloaded() {
        let mut content = content_of(ARTIFACT_THRESHOLD_BYTES);
        assert!(offload_if_oversize("t1", &mut content).is_none());
        assert!(!content.truncated);
    }

    #[test]
    fn text_over_threshold_is_offloaded_and_truncated() {
        let mut content = content_of(ARTIFACT_THRESHOLD_BYTES + 100);
        let artifact = offload_if_oversize("t1", &mut content).unwrap();
        assert_eq!(artifact.bytes.len(), ARTIFACT_THRESHOLD_BYTES + 100);
        assert_eq!(content.excerpt_text.len(), ARTIFACT_THRESHOLD_BYTES);
        assert!(content.truncated);
        assert_eq!(content.artifact_id.as_deref(), Some(artifact.artifact_id.as_str()));
    }

    #[test]
    fn truncation_never_splits_a_multibyte_character() {
        let mut text = "a".repeat(ARTIFACT_THRESHOLD_BYTES - 1);
        text.push('€');
        text.push_str(&"b".repeat(50));
        let mut content = ToolResultContent {
            excerpt_text: text,
            path: None,
            truncated: false,
            artifact_id: None,
            extra: serde_json::Value::Null,
        };
        offload_if_oversize("t1", &mut content);
        assert!(content.excerpt_text.is_char_boundary(content.excerpt_text.len()));
        assert!(std::str::from_utf8(content.excerpt_text.as_bytes()).is_ok());
    }
}
