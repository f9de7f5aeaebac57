// Component B: Privacy Rules (§4.B).
//
// Channel-based sensitivity gating plus a conservative secret scanner.
// Patterns are deliberately permissive (favor false positives over
// leaking a real secret into a chunk or an ACB).
use std::sync::OnceLock;

use regex::Regex;

use memoryd_model::{Channel, Sensitivity};

pub const REDACTION_SENTINEL: &str = "[SECRET_REDACTED]";

/// The highest sensitivity tier a channel may carry (§4.B):
/// `public` → {none, low}; `private`/`team` → {none, low, high};
/// `agent` → {none, low}. No channel allows `secret` to be read back
/// unredacted; `secret` content is coerced by ingestion (§4.D) and only
/// ever surfaces through edit-overlay quarantine handling.
pub fn allowed_sensitivity(channel: Channel) -> Sensitivity {
    match channel {
        Channel::Private | Channel::Team => Sensitivity::High,
        Channel::Public | Channel::Agent => Sensitivity::Low,
    }
}

/// Whether `sensitivity` may be written to `channel` unredacted.
pub fn is_sensitivity_allowed(channel: Channel, sensitivity: Sensitivity) -> bool {
    sensitivity <= allowed_sensitivity(channel)
}

fn secret_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"sk-[A-Za-z0-9]{20,}").unwrap(),
            Regex::new(r"(?i)bearer\s+[A-Za-z0-9._\-]{10,}").unwrap(),
            Regex::new(r"(?i)\b(api[_-]?key|secret|token|password|passwd)\b\s*[:=]\s*\S+").unwrap(),
            Regex::new(r"-----BEGIN [A-Z ]*PRIVATE KEY-----").unwrap(),
            Regex::new(r"\bAKIA[0-9A-Z]{16}\b").unwrap(),
        ]
    })
}

/// Whether `text` contains anything matching a known secret shape.
pub fn contains_secrets(text: &str) -> bool {
    secret_patterns().iter().any(|re| re.is_match(text))
}

/// Replace every matched secret span in `text` with [`REDACTION_SENTINEL`].
/// Idempotent: redacting already-redacted text is a no-op.
pub fn redact_secrets(text: &str) -> String {
    let mut out = text.to_string();
    for re in secret_patterns() {
        out = re.replace_all(&out, REDACTION_SENTINEL).into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_channel_allows_up_to_high_but_not_secret() {
        assert!(is_sensitivity_allowed(Channel::Private, Sensitivity::High));
        assert!(!is_sensitivity_allowed(Channel::Private, Sensitivity::Secret));
    }

    #[test]
    fn public_channel_allows_none_and_low_only() {
        assert!(is_sensitivity_allowed(Channel::Public, Sensitivity::None));
        assert!(is_sensitivity_allowed(Channel::Public, Sensitivity::Low));
        assert!(!is_sensitivity_allowed(Channel::Public, Sensitivity::High));
    }

    #[test]
    fn team_channel_caps_at_high() {
        assert!(is_sensitivity_allowed(Channel::Team, Sensitivity::High));
        assert!(!is_sensitivity_allowed(Channel::Team, Sensitivity::Secret));
    }

    #[test]
    fn agent_channel_caps_at_low() {
        assert!(is_sensitivity_allowed(Channel::Agent, Sensitivity::Low));
        assert!(!is_sensitivity_allowed(Channel::Agent, Sensitivity::High));
    }

    #[test]
    fn no_channel_allows_secret_tier() {
        for ch in [Channel::Private, Channel::Public, Channel::Team, Channel::Agent] {
            assert!(!is_sensitivity_allowed(ch, Sensitivity::Secret));
        }
    }

    #[test]
    fn detects_openai_style_api_key() {
        assert!(contains_secrets("here is my key sk-abcdefghijklmnopqrst1234"));
    }

    #[test]
    fn detects_bearer_token() {
        assert!(contains_secrets("Authorization: Bearer abc123.def456-ghi"));
    }

    #[test]
    fn detects_password_assignment() {
        assert!(contains_secrets("password: hunter2hunter2"));
    }

    #[test]
    fn plain_text_has_no_secrets() {
        assert!(!contains_secrets("just a normal chat message about lunch"));
    }

    #[test]
    fn redaction_replaces_matched_span_with_sentinel() {
        let redacted = redact_secrets("key=sk-abcdefghijklmnopqrst1234 end");
        assert!(redacted.contains(REDACTION_SENTINEL));
        assert!(!contains_secrets(&redacted));
    }

    #[test]
    fn redaction_is_idempotent() {
        let once = redact_secrets("sk-abcdefghijklmnopqrst1234");
        let twice = redact_secrets(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn redaction_leaves_unrelated_text_untouched() {
        let redacted = redact_secrets("nothing sensitive here");
        assert_eq!(redacted, "nothing sensitive here");
    }
}
