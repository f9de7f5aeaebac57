// Guardrail fallback (§4.G): force GENERAL when confidence is low, an
// external drift check fires, or a mode's recent error rate spikes
// relative to the system-wide baseline.
//
// §9 leaves the error-rate window/persistence unspecified ("choose a
// sliding window ... do not guess a specific value without measurement").
// This picks a 5-minute sliding window, persisted in-process per mode —
// the smallest window that still smooths over single-request noise
// without requiring a separate time-series store.
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

use crate::Mode;

const CONFIDENCE_THRESHOLD: f32 = 0.70;
const DEFAULT_WINDOW_SECS: i64 = 300;

struct Outcome {
    at: DateTime<Utc>,
    is_error: bool,
}

/// Per-mode sliding-window error counters backing the guardrail's
/// `modeErrorRate > 2 × baselineErrorRate` check.
pub struct ErrorRateTracker {
    window: Duration,
    by_mode: Mutex<HashMap<Mode, VecDeque<Outcome>>>,
}

impl Default for ErrorRateTracker {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_WINDOW_SECS))
    }
}

impl ErrorRateTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            by_mode: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request's outcome for `mode` at `at`.
    pub fn record(&self, mode: Mode, is_error: bool, at: DateTime<Utc>) {
        let mut guard = self.by_mode.lock().expect("error rate tracker lock poisoned");
        let deque = guard.entry(mode).or_default();
        deque.push_back(Outcome { at, is_error });
        self.evict_stale(deque, at);
    }

    fn evict_stale(&self, deque: &mut VecDeque<Outcome>, now: DateTime<Utc>) {
        let cutoff = now - self.window;
        while let Some(front) = deque.front() {
            if front.at < cutoff {
                deque.pop_front();
            } else {
                break;
            }
        }
    }

    /// Error rate for `mode` within the current window, `0.0` if no
    /// requests have been recorded.
    pub fn error_rate(&self, mode: Mode, now: DateTime<Utc>) -> f32 {
        let mut guard = self.by_mode.lock().expect("error rate tracker lock poisoned");
        let Some(deque) = guard.get_mut(&mode) else {
            return 0.0;
        };
        self.evict_stale(deque, now);
        rate(deque)
    }

    /// Error rate across every mode within the current window — the
    /// baseline the guardrail compares a single mode's rate against.
    pub fn baseline_error_rate(&self, now: DateTime<Utc>) -> f32 {
        let mut guard = self.by_mode.lock().expect("error rate tracker lock poisoned");
        let mut total = 0usize;
        let mut errors = 0usize;
        for deque in guard.values_mut() {
            self.evict_stale(deque, now);
            total += deque.len();
            errors += deque.iter().filter(|o| o.is_error).count();
        }
        if total == 0 {
            0.0
        } else {
            errors as f32 / total as f32
        }
    }
}

fn rate(deque: &VecDeque<Outcome>) -> f32 {
    if deque.is_empty() {
        return 0.0;
    }
    let errors = deque.iter().filter(|o| o.is_error).count();
    errors as f32 / deque.len() as f32
}

/// Result of applying the guardrail to a detected `(mode, confidence)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardrailResult {
    pub mode: Mode,
    pub fallback_reason: Option<String>,
}

/// Apply the guardrail fallback (§4.G): if `confidence` is below 0.70, or
/// `drift_detected` is true, or the mode's tracked error rate exceeds
/// twice the cross-mode baseline, force GENERAL and record why.
pub fn apply_guardrail(
    detected: Mode,
    confidence: f32,
    drift_detected: bool,
    tracker: &ErrorRateTracker,
    now: DateTime<Utc>,
) -> GuardrailResult {
    if confidence < CONFIDENCE_THRESHOLD {
        return GuardrailResult {
            mode: Mode::General,
            fallback_reason: Some(format!(
                "confidence {confidence:.2} below threshold {CONFIDENCE_THRESHOLD:.2}"
            )),
        };
    }
    if drift_detected {
        return GuardrailResult {
            mode: Mode::General,
            fallback_reason: Some("drift check flagged this request".to_string()),
        };
    }
    let mode_rate = tracker.error_rate(detected, now);
    let baseline = tracker.baseline_error_rate(now);
    if mode_rate > 2.0 * baseline && mode_rate > 0.0 {
        return GuardrailResult {
            mode: Mode::General,
            fallback_reason: Some(format!(
                "mode error rate {mode_rate:.2} exceeds 2x baseline {baseline:.2}"
            )),
        };
    }
    GuardrailResult {
        mode: detected,
        fallback_reason: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_confidence_forces_general_with_a_reason() {
        let tracker = ErrorRateTracker::default();
        let result = apply_guardrail(Mode::Task, 0.5, false, &tracker, Utc::now());
        assert_eq!(result.mode, Mode::General);
        assert!(result.fallback_reason.is_some());
    }

    #[test]
    fn drift_check_forces_general() {
        let tracker = ErrorRateTracker::default();
        let result = apply_guardrail(Mode::Debugging, 0.95, true, &tracker, Utc::now());
        assert_eq!(result.mode, Mode::General);
    }

    #[test]
    fn high_confidence_no_drift_keeps_detected_mode() {
        let tracker = ErrorRateTracker::default();
        let result = apply_guardrail(Mode::Debugging, 0.95, false, &tracker, Utc::now());
        assert_eq!(result.mode, Mode::Debugging);
        assert!(result.fallback_reason.is_none());
    }

    #[test]
    fn elevated_mode_error_rate_forces_general() {
        let tracker = ErrorRateTracker::default();
        let now = Utc::now();
        // Baseline: mostly successful requests across several modes.
        for _ in 0..10 {
            tracker.record(Mode::Task, false, now);
            tracker.record(Mode::Learning, false, now);
        }
        // This mode is failing much more than the rest.
        for _ in 0..8 {
            tracker.record(Mode::Debugging, true, now);
        }
        tracker.record(Mode::Debugging, false, now);
        let result = apply_guardrail(Mode::Debugging, 0.95, false, &tracker, now);
        assert_eq!(result.mode, Mode::General);
    }

    #[test]
    fn stale_outcomes_outside_the_window_are_evicted() {
        let tracker = ErrorRateTracker::new(Duration::seconds(60));
        let old = Utc::now() - Duration::seconds(120);
        tracker.record(Mode::Task, true, old);
        let rate = tracker.error_rate(Mode::Task, Utc::now());
        assert_eq!(rate, 0.0);
    }

    #[test]
    fn empty_window_has_zero_error_rate() {
        let tracker = ErrorRateTracker::default();
        assert_eq!(tracker.error_rate(Mode::General, Utc::now()), 0.0);
    }
}
