// Component A: Identifier & Token Estimator (§4.A).
//
// IDs are opaque, time-ordered strings, unique within (tenant, kind) in
// practice because they combine a millisecond timestamp with 64 bits of
// randomness. Prefixes distinguish entity kind at a glance in logs.
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const EVENT_PREFIX: &str = "evt";
pub const CHUNK_PREFIX: &str = "chk";
pub const ARTIFACT_PREFIX: &str = "art";
pub const DECISION_PREFIX: &str = "dec";
pub const TASK_PREFIX: &str = "tsk";
pub const RULE_PREFIX: &str = "rul";
pub const CAPSULE_PREFIX: &str = "cap";
pub const EDIT_PREFIX: &str = "edt";
pub const EDGE_PREFIX: &str = "edg";
pub const ACB_PREFIX: &str = "acb";

/// Generate a new opaque ID for `prefix`, time-ordered by the current
/// instant. Lexicographic string ordering matches creation order because
/// the millisecond timestamp is fixed-width and zero-padded.
pub fn generate_id(prefix: &str) -> String {
    generate_id_at(prefix, Utc::now())
}

/// Deterministic-timestamp variant of [`generate_id`], for tests that need
/// to control ordering without control over wall-clock time.
pub fn generate_id_at(prefix: &str, ts: DateTime<Utc>) -> String {
    let millis = ts.timestamp_millis().max(0) as u64;
    let rand = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{millis:016}{}", &rand[..16])
}

/// Conservative, deterministic token-cost estimate for a string (§4.A).
/// Exactness is not part of the contract; equal inputs must yield equal
/// outputs and the estimate must be monotone in length.
pub fn estimate_tokens(text: &str) -> i32 {
    let len = text.chars().count();
    ((len + 3) / 4).max(if text.is_empty() { 0 } else { 1 }) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_the_requested_prefix() {
        let id = generate_id(EVENT_PREFIX);
        assert!(id.starts_with("evt_"));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = generate_id(CHUNK_PREFIX);
        let b = generate_id(CHUNK_PREFIX);
        assert_ne!(a, b);
    }

    #[test]
    fn ids_at_later_timestamps_sort_after_earlier_ones() {
        let t0 = Utc::now();
        let t1 = t0 + chrono::Duration::milliseconds(5);
        let a = generate_id_at(EVENT_PREFIX, t0);
        let b = generate_id_at(EVENT_PREFIX, t1);
        assert!(a < b, "{a} should sort before {b}");
    }

    #[test]
    fn same_timestamp_ids_are_still_unique() {
        let t = Utc::now();
        let a = generate_id_at(EVENT_PREFIX, t);
        let b = generate_id_at(EVENT_PREFIX, t);
        assert_ne!(a, b);
    }

    #[test]
    fn estimate_tokens_is_deterministic() {
        assert_eq!(estimate_tokens("hello world"), estimate_tokens("hello world"));
    }

    #[test]
    fn estimate_tokens_empty_is_zero() {
        assert_eq!(estimate_tokens(""), 0);
    }

    #[test]
    fn estimate_tokens_is_monotone_in_length() {
        assert!(estimate_tokens("a") <= estimate_tokens("ab"));
        assert!(estimate_tokens("ab") <= estimate_tokens("abc"));
        assert!(estimate_tokens("abcd") <= estimate_tokens("abcde"));
    }

    #[test]
    fn estimate_tokens_matches_ceil_len_over_4_heuristic() {
        assert_eq!(estimate_tokens("1234"), 1);
        assert_eq!(estimate_tokens("12345"), 2);
        assert_eq!(estimate_tokens("12345678"), 2);
    }

    #[test]
    fn estimate_tokens_nonempty_is_always_positive() {
        assert!(estimate_tokens("x") > 0);
    }
}
