// Breach detection (§4.G): log-only signal that a high-priority sticky
// invariant may not get the tailored handling it should.
//
// §4.G specifies the check abstractly ("given an invariant context ... and
// a minimum priority, if any invariant at or above that priority is
// required but missing, a breach event is emitted") without pinning down
// what "required" and "present" mean operationally. This implementation
// grounds it in the one place the spec gives a concrete trigger: guardrail
// fallback (§4.G, §4.H step 5) forcing GENERAL mode abandons the
// mode-tailored sub-budgets a request's sticky invariants would otherwise
// get routed through. So: the invariants *extracted* from the request are
// "required"; a fallback to GENERAL while a required invariant is at or
// above the minimum priority is what counts as "missing" tailored
// handling, and is logged (never aborts assembly, per §4.G/§7).
use crate::invariants::InvariantType;

pub const DEFAULT_MIN_PRIORITY: i32 = 800;

/// A missing-invariant-handling signal, log-only (§4.G, §7: breaches never
/// fail the ACB build).
#[derive(Debug, Clone, PartialEq)]
pub struct BreachEvent {
    pub invariant: InvariantType,
    pub priority: i32,
    pub severity: &'static str,
    pub reason: String,
}

/// Check whether guardrail fallback occurred while `invariants` contains
/// one at or above `min_priority`. Returns the highest-priority offender,
/// if any.
pub fn detect_breach(
    invariants: &[InvariantType],
    min_priority: i32,
    fallback_triggered: bool,
) -> Option<BreachEvent> {
    if !fallback_triggered {
        return None;
    }
    invariants
        .iter()
        .filter(|i| i.priority() >= min_priority)
        .max_by_key(|i| i.priority())
        .map(|invariant| BreachEvent {
            invariant: *invariant,
            priority: invariant.priority(),
            severity: invariant.breach_severity(),
            reason: format!(
                "{} (priority {}) present but mode fell back to GENERAL",
                invariant.as_str(),
                invariant.priority()
            ),
        })
}
