// Telemetry event shapes for the three signal families §4.I names:
// mode detection, guardrail fallback, and invariant breach. Each carries a
// timestamp plus whatever request/session/tenant correlation ids the caller
// has on hand — all optional, since not every call site knows all three.
use chrono::{DateTime, Utc};
use serde::Serialize;

use memoryd_mode::Mode;

/// Correlation ids threaded through from the originating request, where
/// available. None of these are required — a background sweeper, for
/// instance, has none of them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Correlation {
    pub request_id: Option<String>,
    pub session_id: Option<String>,
    pub tenant_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    ModeDetected {
        at: DateTime<Utc>,
        #[serde(flatten)]
        correlation: Correlation,
        mode: Mode,
        confidence: f32,
    },
    FallbackTriggered {
        at: DateTime<Utc>,
        #[serde(flatten)]
        correlation: Correlation,
        from_mode: Mode,
        reason: String,
    },
    InvariantBreach {
        at: DateTime<Utc>,
        #[serde(flatten)]
        correlation: Correlation,
        invariant: String,
        priority: i32,
        severity: &'static str,
        reason: String,
    },
}

impl TelemetryEvent {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            TelemetryEvent::ModeDetected { at, .. } => *at,
            TelemetryEvent::FallbackTriggered { at, .. } => *at,
            TelemetryEvent::InvariantBreach { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_a_snake_case_type_tag() {
        let event = TelemetryEvent::ModeDetected {
            at: Utc::now(),
            correlation: Correlation::default(),
            mode: Mode::Task,
            confidence: 0.95,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "mode_detected");
        assert_eq!(json["mode"], "task");
    }
}
