use memoryd_mode::{InvariantType, Mode};
use serde::Serialize;

/// One packed item within a section: rendered text plus its token cost and,
/// where it came from an identifiable record, that record's id (for
/// provenance / debugging; not part of the §4.H contract shape itself).
#[derive(Debug, Clone, Serialize)]
pub struct AcbItem {
    pub source_id: Option<String>,
    pub text: String,
    pub token_est: i32,
}

/// One of the six ordered ACB sections (§4.H step 3).
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub name: &'static str,
    pub items: Vec<AcbItem>,
    pub token_est: i32,
}

/// A section dropped candidates because its local budget ran out, recorded
/// so callers can see what was omitted rather than silently truncated.
#[derive(Debug, Clone, Serialize)]
pub struct Omission {
    pub section: &'static str,
    pub omitted_count: usize,
}

/// Fixed scoring coefficients (§4.H step 4): contract constants reserved
/// for a future relevance-scoring function, not yet used to rank anything.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoringWeights {
    pub alpha: f32,
    pub beta: f32,
    pub gamma: f32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        ScoringWeights {
            alpha: 0.6,
            beta: 0.3,
            gamma: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProvenanceFilters {
    pub sensitivity_allowed: &'static str,
}

/// Audit trail for one ACB build (§4.H step 4): what was asked for, what
/// pool it was drawn from, and under what filters/weights.
#[derive(Debug, Clone, Serialize)]
pub struct Provenance {
    pub intent: String,
    pub query_terms: Vec<String>,
    pub candidate_pool_size: usize,
    pub filters: ProvenanceFilters,
    pub scoring: ScoringWeights,
}

/// One included capsule reference, surfaced at the top level alongside the
/// `capsules` section's rendered text (§4.H step 6).
#[derive(Debug, Clone, Serialize)]
pub struct CapsuleInclusion {
    pub capsule_id: String,
    pub token_est: i32,
}

/// `buildACB` result (§4.H step 6).
#[derive(Debug, Clone, Serialize)]
pub struct AcbResponse {
    pub acb_id: String,
    pub budget_tokens: i32,
    pub token_used_est: i32,
    pub sections: Vec<Section>,
    pub omissions: Vec<Omission>,
    pub provenance: Provenance,
    pub capsules: Vec<CapsuleInclusion>,
    pub edits_applied: i64,
    pub mode: Mode,
    pub mode_confidence: f32,
    pub mode_invariants: Vec<InvariantType>,
    /// Whether the mode/fallback/breach signals for this build were
    /// successfully handed to the telemetry sink (§4.H step 5, §4.I).
    pub mode_telemetry: bool,
    pub fallback_reason: Option<String>,
}
