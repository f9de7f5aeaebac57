// Top-level entry point combining mode classification, confidence,
// sticky-invariant extraction, and guardrail fallback (§4.G) into the one
// call `memoryd-acb` makes per request.
use chrono::{DateTime, Utc};

use crate::budgets::{budgets_for, ModeBudgets};
use crate::confidence::confidence;
use crate::guardrail::{apply_guardrail, ErrorRateTracker};
use crate::invariants::{extract_invariants, InvariantType};
use crate::mode::detect_mode;
use crate::Mode;

/// Everything the ACB orchestrator needs from mode/invariant detection for
/// one request (§4.H step 2).
#[derive(Debug, Clone)]
pub struct DetectionResult {
    pub mode: Mode,
    pub confidence: f32,
    pub invariants: Vec<InvariantType>,
    pub fallback_reason: Option<String>,
    pub budgets: ModeBudgets,
}

/// Run mode detection end to end: classify, score confidence, extract
/// sticky invariants, then apply the guardrail fallback. `drift_detected`
/// is a caller-supplied signal (§4.G: "a provided drift check") this
/// crate does not compute itself.
pub fn detect(
    intent: &str,
    query_text: &str,
    drift_detected: bool,
    tracker: &ErrorRateTracker,
    now: DateTime<Utc>,
) -> DetectionResult {
    let detected_mode = detect_mode(intent);
    let conf = confidence(intent, detected_mode);
    let invariants = extract_invariants(query_text);
    let guardrail = apply_guardrail(detected_mode, conf, drift_detected, tracker, now);
    DetectionResult {
        mode: guardrail.mode,
        confidence: conf,
        invariants,
        fallback_reason: guardrail.fallback_reason,
        budgets: budgets_for(guardrail.mode),
    }
}
