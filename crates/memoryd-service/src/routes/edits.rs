// POST /memory-edits (§6, §4.E): create an edit targeting a chunk or
// decision. Starts life `proposed`; only a later approval makes it affect
// effective views (§4.E state machine).
use axum::extract::State;
use axum::Json;
use memoryd_model::{EditOp, EditTargetType, MemoryEdit};
use memoryd_overlay::CreateEditInput;
use serde::Deserialize;

use crate::auth::TenantId;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEditBody {
    pub target_type: EditTargetType,
    pub target_id: String,
    pub op: EditOp,
    #[serde(default)]
    pub patch: serde_json::Value,
    #[serde(default)]
    pub reason: Option<String>,
    pub proposed_by: String,
}

pub async fn create_edit(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateEditBody>,
) -> ApiResult<Json<MemoryEdit>> {
    let input = CreateEditInput {
        tenant_id,
        target_type: body.target_type,
        target_id: body.target_id,
        op: body.op,
        patch: body.patch,
        reason: body.reason,
        proposed_by: body.proposed_by,
    };
    let edit = memoryd_overlay::create_edit(&state.pool, input).await?;
    Ok(Json(edit))
}
