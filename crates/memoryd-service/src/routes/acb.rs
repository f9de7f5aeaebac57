// POST /acb/build (§6, §4.H): rate limit, detect mode, assemble sections,
// record the outcome against the error-rate tracker the guardrail reads
// from on the next request.
use axum::extract::State;
use axum::Json;
use memoryd_acb::{AcbRequest, AcbResponse};
use memoryd_model::Channel;
use serde::Deserialize;

use crate::auth::{AgentId, TenantId};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AcbRequestBody {
    pub session_id: String,
    pub agent_id: Option<String>,
    pub channel: Channel,
    pub intent: String,
    pub query_text: String,
    #[serde(default)]
    pub max_tokens: Option<i32>,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub include_capsules: bool,
    #[serde(default)]
    pub include_quarantined: bool,
    /// Set by an upstream drift-detection pass; `false` when absent.
    #[serde(default)]
    pub drift_detected: bool,
}

pub async fn build_acb(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    AgentId(header_agent_id): AgentId,
    Json(body): Json<AcbRequestBody>,
) -> ApiResult<Json<AcbResponse>> {
    state
        .acb_limiter
        .check(&tenant_id)
        .map_err(|retry_after_secs| ApiError::RateLimited { retry_after_secs })?;

    let agent_id = body
        .agent_id
        .or(header_agent_id)
        .ok_or_else(|| ApiError::Validation(memoryd_model::ValidationError::single("agent_id", "must not be empty")))?;

    let request = AcbRequest {
        tenant_id,
        session_id: body.session_id,
        agent_id,
        channel: body.channel,
        intent: body.intent,
        query_text: body.query_text,
        max_tokens: Some(body.max_tokens.unwrap_or(state.default_acb_max_tokens)),
        subject_type: body.subject_type,
        subject_id: body.subject_id,
        project_id: body.project_id,
        include_capsules: body.include_capsules,
        include_quarantined: body.include_quarantined,
    };

    let mode = memoryd_mode::detect_mode(&request.intent, &request.query_text);
    let result = memoryd_acb::build_acb(
        &state.pool,
        &request,
        &state.error_tracker,
        body.drift_detected,
        &state.telemetry,
    )
    .await;

    state
        .error_tracker
        .record(mode, result.is_err(), chrono::Utc::now());

    Ok(Json(result?))
}
