// Sticky-invariant extraction (§4.G): safety/correction/constraint/error
// signals pulled from free-form query text via substring heuristics.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvariantType {
    SafetyRequirement,
    UserCorrection,
    HardConstraint,
    BlockingError,
}

impl InvariantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvariantType::SafetyRequirement => "SAFETY_REQUIREMENT",
            InvariantType::UserCorrection => "USER_CORRECTION",
            InvariantType::HardConstraint => "HARD_CONSTRAINT",
            InvariantType::BlockingError => "BLOCKING_ERROR",
        }
    }

    /// Fixed priority (§4.G): SAFETY=1000, USER_CORRECTION=900,
    /// HARD_CONSTRAINT=800, BLOCKING_ERROR=700.
    pub fn priority(&self) -> i32 {
        match self {
            InvariantType::SafetyRequirement => 1000,
            InvariantType::UserCorrection => 900,
            InvariantType::HardConstraint => 800,
            InvariantType::BlockingError => 700,
        }
    }

    /// Telemetry severity for a breach involving this invariant type
    /// (§4.I): SAFETY → critical; USER_CORRECTION/HARD_CONSTRAINT → high;
    /// else → medium.
    pub fn breach_severity(&self) -> &'static str {
        match self {
            InvariantType::SafetyRequirement => "critical",
            InvariantType::UserCorrection | InvariantType::HardConstraint => "high",
            InvariantType::BlockingError => "medium",
        }
    }
}

fn padded(text: &str) -> String {
    format!(" {} ", text.to_lowercase())
}

/// Extract the sticky invariants present in `query_text` (§4.G), each type
/// appearing at most once, ordered by priority descending.
pub fn extract_invariants(query_text: &str) -> Vec<InvariantType> {
    let lower = query_text.to_lowercase();
    let padded = padded(query_text);
    let mut found = Vec::new();

    let safety_markers = ["safety", "security", "must be secure", "must validate", "authentication"];
    if safety_markers.iter().any(|m| lower.contains(m)) {
        found.push(InvariantType::SafetyRequirement);
    }

    let correction_markers = [" actually ", " wait ", " no, ", " correction", " instead"];
    if correction_markers.iter().any(|m| padded.contains(m))
        || (padded.contains(" not ") && padded.contains(" but "))
    {
        found.push(InvariantType::UserCorrection);
    }

    let constraint_markers = [" must ", " must not ", " required ", " mandatory ", " critical "];
    if constraint_markers.iter().any(|m| padded.contains(m)) {
        found.push(InvariantType::HardConstraint);
    }

    let error_markers = [" error ", " fail", " bug ", " broken ", " crash", " exception"];
    if error_markers.iter().any(|m| padded.contains(m)) {
        found.push(InvariantType::BlockingError);
    }

    found.sort_by(|a, b| b.priority().cmp(&a.priority()));
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_safety_requirement() {
        let invariants = extract_invariants("this must be secure before we ship");
        assert!(invariants.contains(&InvariantType::SafetyRequirement));
    }

    #[test]
    fn detects_user_correction_via_actually() {
        let invariants = extract_invariants("actually let's use postgres instead");
        assert!(invariants.contains(&InvariantType::UserCorrection));
    }

    #[test]
    fn detects_user_correction_via_not_but() {
        let invariants = extract_invariants("not sqlite but postgres");
        assert!(invariants.contains(&InvariantType::UserCorrection));
    }

    #[test]
    fn detects_hard_constraint() {
        let invariants = extract_invariants("this field is required for every request");
        assert!(invariants.contains(&InvariantType::HardConstraint));
    }

    #[test]
    fn detects_blocking_error() {
        let invariants = extract_invariants("connection refused error in pool");
        assert!(invariants.contains(&InvariantType::BlockingError));
    }

    #[test]
    fn each_type_appears_at_most_once() {
        let invariants = extract_invariants("must must must error error error");
        let constraint_count = invariants
            .iter()
            .filter(|i| **i == InvariantType::HardConstraint)
            .count();
        assert_eq!(constraint_count, 1);
    }

    #[test]
    fn ordered_by_priority_descending() {
        let invariants = extract_invariants(
            "this is a security issue, it's a required fix, actually there's an error here",
        );
        let priorities: Vec<i32> = invariants.iter().map(|i| i.priority()).collect();
        let mut sorted = priorities.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(priorities, sorted);
    }

    #[test]
    fn no_markers_produces_empty_set() {
        assert!(extract_invariants("just chatting about lunch").is_empty());
    }

    #[test]
    fn priorities_match_spec_constants() {
        assert_eq!(InvariantType::SafetyRequirement.priority(), 1000);
        assert_eq!(InvariantType::UserCorrection.priority(), 900);
        assert_eq!(InvariantType::HardConstraint.priority(), 800);
        assert_eq!(InvariantType::BlockingError.priority(), 700);
    }
}
