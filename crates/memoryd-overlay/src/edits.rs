// create_edit (§6 "POST /memory-edits"): validates the target chunk or
// decision exists for the caller's tenant, then persists the edit in its
// initial `proposed` state (§4.E state machine: `proposed -> approved`;
// `proposed -> rejected`; only `approved` affects effective views).
use chrono::Utc;
use memoryd_core::{generate_id, EDIT_PREFIX};
use memoryd_model::{EditOp, EditStatus, EditTargetType, MemoryEdit};
use memoryd_store::StoreError;
use sqlx::PgExecutor;

use crate::error::{OverlayError, OverlayResult};

pub struct CreateEditInput {
    pub tenant_id: String,
    pub target_type: EditTargetType,
    pub target_id: String,
    pub op: EditOp,
    pub patch: serde_json::Value,
    pub reason: Option<String>,
    pub proposed_by: String,
}

pub async fn create_edit<'c>(
    executor: impl PgExecutor<'c> + Copy,
    input: CreateEditInput,
) -> OverlayResult<MemoryEdit> {
    let target_exists = match input.target_type {
        EditTargetType::Chunk => {
            memoryd_store::get_chunk(executor, &input.tenant_id, &input.target_id).await
        }
        EditTargetType::Decision => {
            memoryd_store::get_decision(executor, &input.tenant_id, &input.target_id).await
        }
    };
    target_exists.map_err(|err| match err {
        StoreError::NotFound(what) => OverlayError::NotFound(what),
        other => OverlayError::Store(other),
    })?;

    let edit = MemoryEdit {
        edit_id: generate_id(EDIT_PREFIX),
        tenant_id: input.tenant_id,
        target_type: input.target_type,
        target_id: input.target_id,
        op: input.op,
        patch: input.patch,
        reason: input.reason,
        proposed_by: input.proposed_by,
        status: EditStatus::Proposed,
        created_at: Utc::now(),
        applied_at: None,
    };
    memoryd_store::insert_edit(executor, &edit).await?;
    Ok(edit)
}
