// POST /events (§6, §4.D): validate, rate limit, then `record_event`.
use axum::extract::State;
use axum::Json;
use memoryd_model::EventInput;
use serde::Serialize;

use crate::auth::TenantId;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RecordEventResponse {
    pub event_id: String,
    pub chunk_ids: Vec<String>,
    pub artifact_id: Option<String>,
}

pub async fn create_event(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Json(mut input): Json<EventInput>,
) -> ApiResult<Json<RecordEventResponse>> {
    input.tenant_id = tenant_id.clone();

    state
        .event_limiter
        .check(&tenant_id)
        .map_err(|retry_after_secs| ApiError::RateLimited { retry_after_secs })?;

    let result =
        memoryd_ingest::record_event(&state.pool, input, state.secret_scanning_enabled).await?;

    Ok(Json(RecordEventResponse {
        event_id: result.event_id,
        chunk_ids: result.chunk_ids,
        artifact_id: result.artifact_id,
    }))
}
