// Confidence estimation for a detected (intent, mode) pair (§4.G).
use crate::mode::{is_core_word_match, is_variation_match, matched_nothing};
use crate::Mode;

/// Confidence score for a detected mode, per the rules in §4.G:
/// empty intent → 0.5; exact core-word match → 0.95; variation match →
/// 0.85; unknown intent mapped to GENERAL → 0.6; otherwise → 0.5.
pub fn confidence(intent: &str, mode: Mode) -> f32 {
    if intent.trim().is_empty() {
        return 0.5;
    }
    if is_core_word_match(intent, mode) {
        return 0.95;
    }
    if is_variation_match(intent, mode) {
        return 0.85;
    }
    if mode == Mode::General && matched_nothing(intent) {
        return 0.6;
    }
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_intent_is_half_confidence() {
        assert_eq!(confidence("", Mode::General), 0.5);
    }

    #[test]
    fn core_word_match_is_high_confidence() {
        assert_eq!(confidence("debug", Mode::Debugging), 0.95);
        assert_eq!(confidence("task", Mode::Task), 0.95);
    }

    #[test]
    fn variation_match_is_medium_high_confidence() {
        assert_eq!(confidence("fix", Mode::Debugging), 0.85);
        assert_eq!(confidence("investigate", Mode::Exploration), 0.85);
    }

    #[test]
    fn unknown_intent_mapped_to_general_is_point_six() {
        assert_eq!(confidence("xyzzy", Mode::General), 0.6);
    }

    #[test]
    fn mismatched_intent_and_mode_is_low_confidence() {
        // "debug" was classified as Debugging; asking about its confidence
        // against an unrelated mode it wasn't matched to falls through.
        assert_eq!(confidence("debug", Mode::Learning), 0.5);
    }
}
