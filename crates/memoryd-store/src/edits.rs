// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use memoryd_model::{EditOp, EditStatus, EditTargetType, MemoryEdit};
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct MemoryEditRow {
    edit_id: String,
    tenant_id: String,
    target_type: String,
    target_id: String,
    op: String,
    patch: serde_json::Value,
    reason: Option<String>,
    proposed_by: String,
    status: String,
    created_at: DateTime<Utc>,
    applied_at: Option<DateTime<Utc>>,
}

impl TryFrom<MemoryEditRow> for MemoryEdit {
    type Error = StoreError;

    fn try_from(row: MemoryEditRow) -> Result<Self, Self::Error> {
        Ok(MemoryEdit {
            edit_id: row.edit_id,
            tenant_id: row.tenant_id,
            target_type: EditTargetType::parse(&row.target_type).ok_or_else(|| {
                StoreError::Conflict(format!("unknown edit target type: {}", row.target_type))
            })?,
            target_id: row.target_id,
            op: EditOp::parse(&row.op)
                .ok_or_else(|| StoreError::Conflict(format!("unknown edit op: {}", row.op)))?,
            patch: row.patch,
            reason: row.reason,
            proposed_by: row.proposed_by,
            status: EditStatus::parse(&row.status)
                .ok_or_else(|| StoreError::Conflict(format!("unknown edit status: {}", row.status)))?,
            created_at: row.created_at,
            applied_at: row.applied_at,
        })
    }
}

pub async fn insert_edit<'c>(executor: impl PgExecutor<'c>, edit: &MemoryEdit) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO memory_edits (edit_id, tenant_id, target_type, target_id, op, patch, reason, \
         proposed_by, status, created_at, applied_at) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)",
    )
    .bind(&edit.edit_id)
    .bind(&edit.tenant_id)
    .bind(edit.target_type.as_str())
    .bind(&edit.target_id)
    .bind(edit.op.as_str())
    .bind(&edit.patch)
    .bind(&edit.reason)
    .bind(&edit.proposed_by)
    .bind(edit.status.as_str())
    .bind(edit.created_at)
    .bind(edit.applied_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_edit<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edit_id: &str,
) -> StoreResult<MemoryEdit> {
    let row: MemoryEditRow =
        sqlx::query_as("SELECT * FROM memory_edits WHERE tenant_id = $1 AND edit_id = $2")
            .bind(tenant_id)
            .bind(edit_id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("memory edit {edit_id}")))?;
    row.try_into()
}

/// Approved edits against one target, oldest first, so `memoryd-overlay`
/// folds them in application order (§3: "non-destructive alteration").
pub async fn list_approved_edits_for_target<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    target_type: EditTargetType,
    target_id: &str,
) -> StoreResult<Vec<MemoryEdit>> {
    let rows: Vec<MemoryEditRow> = sqlx::query_as(
        "SELECT * FROM memory_edits WHERE tenant_id = $1 AND target_type = $2 AND target_id = $3 \
         AND status = $4 ORDER BY created_at ASC",
    )
    .bind(tenant_id)
    .bind(target_type.as_str())
    .bind(target_id)
    .bind(EditStatus::Approved.as_str())
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

/// All approved edits for a tenant, oldest first. `memoryd-overlay` groups
/// these by target when folding a whole tenant's chunks/decisions at once.
pub async fn list_approved_edits<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
) -> StoreResult<Vec<MemoryEdit>> {
    let rows: Vec<MemoryEditRow> = sqlx::query_as(
        "SELECT * FROM memory_edits WHERE tenant_id = $1 AND status = $2 ORDER BY created_at ASC",
    )
    .bind(tenant_id)
    .bind(EditStatus::Approved.as_str())
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub async fn update_edit_status<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edit_id: &str,
    status: EditStatus,
    applied_at: Option<DateTime<Utc>>,
) -> StoreResult<()> {
    let result = sqlx::query(
        "UPDATE memory_edits SET status = $1, applied_at = $2 WHERE tenant_id = $3 AND edit_id = $4",
    )
    .bind(status.as_str())
    .bind(applied_at)
    .bind(tenant_id)
    .bind(edit_id)
    .execute(executor)
    .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("memory edit {edit_id}")));
    }
    Ok(())
}
