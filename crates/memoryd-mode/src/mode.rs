// Component G: intent → interaction mode classification (§4.G).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Task,
    Exploration,
    Debugging,
    Learning,
    General,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Task => "task",
            Mode::Exploration => "exploration",
            Mode::Debugging => "debugging",
            Mode::Learning => "learning",
            Mode::General => "general",
        }
    }
}

/// Core word each mode's intent maps from exactly (§4.G confidence table).
fn core_word(mode: Mode) -> &'static str {
    match mode {
        Mode::Task => "task",
        Mode::Debugging => "debug",
        Mode::Exploration => "explore",
        Mode::Learning => "learn",
        Mode::General => "general",
    }
}

/// Intent synonyms that still map to `mode` but count as a "variation"
/// match rather than the core word for confidence purposes.
fn variations(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Task => &["implement"],
        Mode::Debugging => &["fix", "error"],
        Mode::Exploration => &["investigate"],
        Mode::Learning => &["explain", "teach"],
        Mode::General => &["default", "unknown"],
    }
}

/// Classify a trimmed, case-insensitive `intent` string into a mode, per
/// the intent→mode table (§4.G). Unrecognized intents fall back to GENERAL
/// — this is the spec's "unknown" case, distinct from the literal words
/// "general"/"default"/"unknown" which map there explicitly too.
pub fn detect_mode(intent: &str) -> Mode {
    let normalized = intent.trim().to_lowercase();
    for mode in [
        Mode::Task,
        Mode::Debugging,
        Mode::Exploration,
        Mode::Learning,
        Mode::General,
    ] {
        if normalized == core_word(mode) || variations(mode).contains(&normalized.as_str()) {
            return mode;
        }
    }
    Mode::General
}

/// Whether `intent` matched the mode's core word exactly (as opposed to a
/// variation, or falling through to GENERAL because nothing matched).
pub(crate) fn is_core_word_match(intent: &str, mode: Mode) -> bool {
    intent.trim().to_lowercase() == core_word(mode)
}

/// Whether `intent` matched one of the mode's variation words.
pub(crate) fn is_variation_match(intent: &str, mode: Mode) -> bool {
    variations(mode).contains(&intent.trim().to_lowercase().as_str())
}

/// Whether `intent`, after trimming/lowercasing, matched *nothing* in the
/// intent→mode table at all (so `detect_mode` fell through to GENERAL).
pub(crate) fn matched_nothing(intent: &str) -> bool {
    let normalized = intent.trim().to_lowercase();
    ![Mode::Task, Mode::Debugging, Mode::Exploration, Mode::Learning, Mode::General]
        .into_iter()
        .any(|m| normalized == core_word(m) || variations(m).contains(&normalized.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_words_map_to_expected_modes() {
        assert_eq!(detect_mode("task"), Mode::Task);
        assert_eq!(detect_mode("debug"), Mode::Debugging);
        assert_eq!(detect_mode("explore"), Mode::Exploration);
        assert_eq!(detect_mode("learn"), Mode::Learning);
        assert_eq!(detect_mode("general"), Mode::General);
    }

    #[test]
    fn variation_words_map_to_the_same_mode_as_their_core_word() {
        assert_eq!(detect_mode("implement"), Mode::Task);
        assert_eq!(detect_mode("fix"), Mode::Debugging);
        assert_eq!(detect_mode("error"), Mode::Debugging);
        assert_eq!(detect_mode("investigate"), Mode::Exploration);
        assert_eq!(detect_mode("explain"), Mode::Learning);
        assert_eq!(detect_mode("teach"), Mode::Learning);
    }

    #[test]
    fn matching_is_case_insensitive_and_trims_whitespace() {
        assert_eq!(detect_mode("  DEBUG  "), Mode::Debugging);
        assert_eq!(detect_mode("Implement"), Mode::Task);
    }

    #[test]
    fn unrecognized_intent_falls_back_to_general() {
        assert_eq!(detect_mode("something else entirely"), Mode::General);
    }

    #[test]
    fn empty_intent_falls_back_to_general() {
        assert_eq!(detect_mode(""), Mode::General);
    }
}
