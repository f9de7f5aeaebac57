// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use memoryd_model::{Decision, DecisionStatus, ScopeLabels};
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct DecisionRow {
    decision_id: String,
    tenant_id: String,
    ts: DateTime<Utc>,
    decision: String,
    rationale: serde_json::Value,
    status: String,
    refs: serde_json::Value,
    scope: Option<String>,
    subject_type: Option<String>,
    subject_id: Option<String>,
    project_id: Option<String>,
}

impl TryFrom<DecisionRow> for Decision {
    type Error = StoreError;

    fn try_from(row: DecisionRow) -> Result<Self, Self::Error> {
        Ok(Decision {
            decision_id: row.decision_id,
            tenant_id: row.tenant_id,
            ts: row.ts,
            decision: row.decision,
            rationale: serde_json::from_value(row.rationale)?,
            status: DecisionStatus::parse(&row.status)
                .ok_or_else(|| StoreError::Conflict(format!("unknown decision status: {}", row.status)))?,
            refs: serde_json::from_value(row.refs)?,
            labels: ScopeLabels {
                scope: row.scope,
                subject_type: row.subject_type,
                subject_id: row.subject_id,
                project_id: row.project_id,
            },
        })
    }
}

pub async fn insert_decision<'c>(
    executor: impl PgExecutor<'c>,
    decision: &Decision,
) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO decisions (decision_id, tenant_id, ts, decision, rationale, status, refs, \
         scope, subject_type, subject_id, project_id) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)",
    )
    .bind(&decision.decision_id)
    .bind(&decision.tenant_id)
    .bind(decision.ts)
    .bind(&decision.decision)
    .bind(serde_json::to_value(&decision.rationale)?)
    .bind(decision.status.as_str())
    .bind(serde_json::to_value(&decision.refs)?)
    .bind(&decision.labels.scope)
    .bind(&decision.labels.subject_type)
    .bind(&decision.labels.subject_id)
    .bind(&decision.labels.project_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_decision<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    decision_id: &str,
) -> StoreResult<Decision> {
    let row: DecisionRow =
        sqlx::query_as("SELECT * FROM decisions WHERE tenant_id = $1 AND decision_id = $2")
            .bind(tenant_id)
            .bind(decision_id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("decision {decision_id}")))?;
    row.try_into()
}

/// Decisions in `status`, most recent first. Used by `memoryd-overlay` to
/// build the `relevant_decisions` ACB section (§4.E, §4.H).
pub async fn list_decisions_by_status<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    status: DecisionStatus,
) -> StoreResult<Vec<Decision>> {
    let rows: Vec<DecisionRow> = sqlx::query_as(
        "SELECT * FROM decisions WHERE tenant_id = $1 AND status = $2 ORDER BY ts DESC",
    )
    .bind(tenant_id)
    .bind(status.as_str())
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

pub async fn update_decision_status<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    decision_id: &str,
    status: DecisionStatus,
) -> StoreResult<()> {
    let result = sqlx::query("UPDATE decisions SET status = $1 WHERE tenant_id = $2 AND decision_id = $3")
        .bind(status.as_str())
        .bind(tenant_id)
        .bind(decision_id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("decision {decision_id}")));
    }
    Ok(())
}
