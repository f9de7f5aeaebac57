// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use memoryd_model::{Capsule, CapsuleItems, CapsuleStatus};
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct CapsuleRow {
    capsule_id: String,
    tenant_id: String,
    scope: String,
    subject_type: Option<String>,
    subject_id: Option<String>,
    author_agent_id: String,
    audience_agent_ids: serde_json::Value,
    items: serde_json::Value,
    risks: serde_json::Value,
    ttl_days: i32,
    status: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<CapsuleRow> for Capsule {
    type Error = StoreError;

    fn try_from(row: CapsuleRow) -> Result<Self, Self::Error> {
        Ok(Capsule {
            capsule_id: row.capsule_id,
            tenant_id: row.tenant_id,
            scope: row.scope,
            subject_type: row.subject_type,
            subject_id: row.subject_id,
            author_agent_id: row.author_agent_id,
            audience_agent_ids: serde_json::from_value(row.audience_agent_ids)?,
            items: serde_json::from_value::<CapsuleItems>(row.items)?,
            risks: serde_json::from_value(row.risks)?,
            ttl_days: row.ttl_days,
            status: CapsuleStatus::parse(&row.status)
                .ok_or_else(|| StoreError::Conflict(format!("unknown capsule status: {}", row.status)))?,
            created_at: row.created_at,
            expires_at: row.expires_at,
        })
    }
}

pub async fn insert_capsule<'c>(executor: impl PgExecutor<'c>, capsule: &Capsule) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO capsules (capsule_id, tenant_id, scope, subject_type, subject_id, \
         author_agent_id, audience_agent_ids, items, risks, ttl_days, status, created_at, expires_at) \
         VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)",
    )
    .bind(&capsule.capsule_id)
    .bind(&capsule.tenant_id)
    .bind(&capsule.scope)
    .bind(&capsule.subject_type)
    .bind(&capsule.subject_id)
    .bind(&capsule.author_agent_id)
    .bind(serde_json::to_value(&capsule.audience_agent_ids)?)
    .bind(serde_json::to_value(&capsule.items)?)
    .bind(serde_json::to_value(&capsule.risks)?)
    .bind(capsule.ttl_days)
    .bind(capsule.status.as_str())
    .bind(capsule.created_at)
    .bind(capsule.expires_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_capsule<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    capsule_id: &str,
) -> StoreResult<Capsule> {
    let row: CapsuleRow =
        sqlx::query_as("SELECT * FROM capsules WHERE tenant_id = $1 AND capsule_id = $2")
            .bind(tenant_id)
            .bind(capsule_id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("capsule {capsule_id}")))?;
    row.try_into()
}

/// All capsules for a tenant. `memoryd-capsules::listCapsules` filters by
/// audience/expiry/status itself rather than pushing that logic into SQL,
/// since `Capsule::is_unavailable`/`is_visible_to` are the single source
/// of truth for those checks (§4.F, §8).
pub async fn list_capsules<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
) -> StoreResult<Vec<Capsule>> {
    let rows: Vec<CapsuleRow> =
        sqlx::query_as("SELECT * FROM capsules WHERE tenant_id = $1 ORDER BY created_at DESC")
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub async fn update_capsule_status<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    capsule_id: &str,
    status: CapsuleStatus,
) -> StoreResult<()> {
    let result =
        sqlx::query("UPDATE capsules SET status = $1 WHERE tenant_id = $2 AND capsule_id = $3")
            .bind(status.as_str())
            .bind(tenant_id)
            .bind(capsule_id)
            .execute(executor)
            .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("capsule {capsule_id}")));
    }
    Ok(())
}

/// Capsules still marked `active` whose `expires_at` has passed. The
/// expiry sweeper (`memoryd-capsules`) uses this to flip them to `expired`
/// for observability; readers must still check `expires_at` directly.
pub async fn list_expired_active_capsules<'c>(
    executor: impl PgExecutor<'c>,
    now: DateTime<Utc>,
) -> StoreResult<Vec<Capsule>> {
    let rows: Vec<CapsuleRow> =
        sqlx::query_as("SELECT * FROM capsules WHERE status = $1 AND expires_at <= $2")
            .bind(CapsuleStatus::Active.as_str())
            .bind(now)
            .fetch_all(executor)
            .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}
