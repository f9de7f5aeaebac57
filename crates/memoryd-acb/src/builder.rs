// buildACB orchestrator (§4.H): assembles the six ordered sections under a
// mode-derived token budget, then attaches provenance and telemetry.
use chrono::Utc;
use memoryd_core::{allowed_sensitivity, generate_id, ACB_PREFIX};
use memoryd_mode::{detect, detect_breach, ErrorRateTracker, DEFAULT_MIN_PRIORITY};
use memoryd_overlay::{build_tsquery, SearchFilters};
use memoryd_telemetry::{Correlation, TelemetryEvent, TelemetrySink};
use sqlx::PgPool;

use crate::error::AcbResult;
use crate::request::{AcbRequest, DEFAULT_MAX_TOKENS};
use crate::response::{AcbResponse, Omission, Provenance, ProvenanceFilters, ScoringWeights, Section};
use crate::sections::{capsules, recent_window, relevant_decisions, retrieved_evidence, rules, task_state};

fn query_terms(query_text: &str) -> Vec<String> {
    build_tsquery(query_text)
        .split(" & ")
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run `buildACB` end to end for one request.
///
/// `tracker` backs the mode detector's guardrail (§4.G) and is owned by the
/// caller across requests, not by this crate — recording the outcome of
/// this particular build (success/error) is the caller's responsibility
/// once it knows that outcome, so this function only reads from `tracker`.
pub async fn build_acb(
    pool: &PgPool,
    request: &AcbRequest,
    tracker: &ErrorRateTracker,
    drift_detected: bool,
    telemetry: &TelemetrySink,
) -> AcbResult<AcbResponse> {
    let now = Utc::now();
    let budget_tokens = request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);

    let detection = detect(&request.intent, &request.query_text, drift_detected, tracker, now);
    let mut budgets = detection.budgets;
    if !request.include_capsules {
        budgets.capsules = 0;
    }

    let correlation = Correlation {
        request_id: None,
        session_id: Some(request.session_id.clone()),
        tenant_id: Some(request.tenant_id.clone()),
    };

    telemetry
        .record(TelemetryEvent::ModeDetected {
            at: now,
            correlation: correlation.clone(),
            mode: detection.mode,
            confidence: detection.confidence,
        })
        .await;
    if let Some(reason) = &detection.fallback_reason {
        telemetry
            .record(TelemetryEvent::FallbackTriggered {
                at: now,
                correlation: correlation.clone(),
                from_mode: detection.mode,
                reason: reason.clone(),
            })
            .await;
    }

    let mut used = 0;
    let mut sections: Vec<Section> = Vec::with_capacity(6);
    let mut omissions: Vec<Omission> = Vec::new();

    let local = |section_budget: i32, used: i32| section_budget.min((budget_tokens - used).max(0));

    let (section, omission) =
        rules::build(pool, &request.tenant_id, request.channel, local(budgets.rules, used)).await?;
    used += section.token_est;
    sections.push(section);
    omissions.extend(omission);

    let (section, omission) =
        task_state::build(pool, &request.tenant_id, local(budgets.task_state, used)).await?;
    used += section.token_est;
    sections.push(section);
    omissions.extend(omission);

    let (section, omission) = recent_window::build(
        pool,
        &request.tenant_id,
        &request.session_id,
        request.channel,
        local(budgets.recent_window, used),
    )
    .await?;
    used += section.token_est;
    sections.push(section);
    omissions.extend(omission);

    let (section, capsule_inclusions, omission) = capsules::build(
        pool,
        &request.tenant_id,
        &request.agent_id,
        request.subject_type.as_deref(),
        request.subject_id.as_deref(),
        local(budgets.capsules, used),
    )
    .await?;
    used += section.token_est;
    sections.push(section);
    omissions.extend(omission);

    let search_filters = SearchFilters {
        scope: None,
        subject_type: request.subject_type.clone(),
        subject_id: request.subject_id.clone(),
        project_id: request.project_id.clone(),
        include_quarantined: request.include_quarantined,
        channel: Some(request.channel),
        limit: 0,
    };
    let (section, omission, candidate_pool_size, edits_applied) = retrieved_evidence::build(
        pool,
        &request.tenant_id,
        &request.query_text,
        &search_filters,
        local(budgets.retrieved_evidence, used),
    )
    .await?;
    used += section.token_est;
    sections.push(section);
    omissions.extend(omission);

    let (section, omission) = relevant_decisions::build(
        pool,
        &request.tenant_id,
        &request.query_text,
        local(budgets.relevant_decisions, used),
    )
    .await?;
    used += section.token_est;
    sections.push(section);
    omissions.extend(omission);

    let breach = detect_breach(
        &detection.invariants,
        DEFAULT_MIN_PRIORITY,
        detection.fallback_reason.is_some(),
    );
    if let Some(breach) = &breach {
        telemetry
            .record(TelemetryEvent::InvariantBreach {
                at: now,
                correlation,
                invariant: breach.invariant.as_str().to_string(),
                priority: breach.priority,
                severity: breach.severity,
                reason: breach.reason.clone(),
            })
            .await;
    }

    let provenance = Provenance {
        intent: request.intent.clone(),
        query_terms: query_terms(&request.query_text),
        candidate_pool_size,
        filters: ProvenanceFilters {
            sensitivity_allowed: allowed_sensitivity(request.channel).as_str(),
        },
        scoring: ScoringWeights::default(),
    };

    Ok(AcbResponse {
        acb_id: generate_id(ACB_PREFIX),
        budget_tokens,
        token_used_est: used,
        sections,
        omissions,
        provenance,
        capsules: capsule_inclusions,
        edits_applied,
        mode: detection.mode,
        mode_confidence: detection.confidence,
        mode_invariants: detection.invariants,
        mode_telemetry: true,
        fallback_reason: detection.fallback_reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_terms_drops_short_tokens_and_lowercases() {
        assert_eq!(
            query_terms("Connection Refused in the Pool"),
            vec!["connection", "refused", "the", "pool"]
        );
    }

    #[test]
    fn empty_query_has_no_terms() {
        assert!(query_terms("").is_empty());
    }
}
