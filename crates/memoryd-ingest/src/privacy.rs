// Privacy coercion (§4.B, §4.D step 4): called on the serialized content
// before any write. If a secret shape is found, sensitivity is coerced to
// `secret` and every string field is redacted in place.
use memoryd_core::{contains_secrets, redact_secrets};
use memoryd_model::{EventContent, Sensitivity};

/// Mutates `content` and returns the sensitivity ingestion should persist:
/// `detected` unless a secret is found, in which case `Secret` always wins.
/// `scanning_enabled = false` (§6 "secret-scanning toggle") skips the scan
/// entirely and returns `detected` unchanged.
pub fn apply_privacy_coercion(
    content: &mut EventContent,
    detected: Sensitivity,
    scanning_enabled: bool,
) -> Sensitivity {
    if !scanning_enabled {
        return detected;
    }
    let serialized = serde_json::to_string(content).unwrap_or_default();
    if !contains_secrets(&serialized) {
        return detected;
    }
    content.redact_all_string_leaves(&|s| redact_secrets(s));
    Sensitivity::Secret
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoryd_model::MessageContent;

    #[test]
    fn clean_content_keeps_detected_sensitivity() {
        let mut content = EventContent::Message(MessageContent {
            text: "hello".into(),
            extra: serde_json::Value::Null,
        });
        let result = apply_privacy_coercion(&mut content, Sensitivity::None, true);
        assert_eq!(result, Sensitivity::None);
    }

    #[test]
    fn secret_shaped_text_is_redacted_and_coerces_to_secret() {
        let mut content = EventContent::Message(MessageContent {
            text: "api_key: sk-abcdefghijklmnopqrstuvwxyz".into(),
            extra: serde_json::Value::Null,
        });
        let result = apply_privacy_coercion(&mut content, Sensitivity::None, true);
        assert_eq!(result, Sensitivity::Secret);
        if let EventContent::Message(m) = &content {
            assert!(!m.text.contains("sk-abcdefghijklmnopqrstuvwxyz"));
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn secret_hidden_in_tool_call_args_is_redacted() {
        use memoryd_model::ToolCallContent;
        let mut content = EventContent::ToolCall(ToolCallContent {
            name: "curl".into(),
            args: serde_json::json!({"header": "Authorization: Bearer abc123.def456-ghi"}),
            extra: serde_json::Value::Null,
        });
        let result = apply_privacy_coercion(&mut content, Sensitivity::None, true);
        assert_eq!(result, Sensitivity::Secret);
        if let EventContent::ToolCall(t) = &content {
            let rendered = t.args.to_string();
            assert!(!rendered.contains("abc123.def456-ghi"));
            assert!(rendered.contains("[SECRET_REDACTED]"));
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn secret_hidden_in_extra_is_redacted() {
        let mut content = EventContent::Message(MessageContent {
            text: "just chatting".into(),
            extra: serde_json::json!({"nested": {"note": "password: hunter2hunter2"}}),
        });
        let result = apply_privacy_coercion(&mut content, Sensitivity::None, true);
        assert_eq!(result, Sensitivity::Secret);
        if let EventContent::Message(m) = &content {
            let rendered = m.extra.to_string();
            assert!(!rendered.contains("hunter2hunter2"));
            assert!(rendered.contains("[SECRET_REDACTED]"));
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn disabled_scanning_leaves_secret_shaped_text_untouched() {
        let mut content = EventContent::Message(MessageContent {
            text: "api_key: sk-abcdefghijklmnopqrstuvwxyz".into(),
            extra: serde_json::Value::Null,
        });
        let result = apply_privacy_coercion(&mut content, Sensitivity::None, false);
        assert_eq!(result, Sensitivity::None);
        if let EventContent::Message(m) = &content {
            assert!(m.text.contains("sk-abcdefghijklmnopqrstuvwxyz"));
        } else {
            panic!("wrong variant");
        }
    }
}
