// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use memoryd_model::{Task, TaskStatus};
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: String,
    tenant_id: String,
    title: String,
    details: Option<String>,
    status: String,
    ts: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            task_id: row.task_id,
            tenant_id: row.tenant_id,
            title: row.title,
            details: row.details,
            status: TaskStatus::parse(&row.status)
                .ok_or_else(|| StoreError::Conflict(format!("unknown task status: {}", row.status)))?,
            ts: row.ts,
        })
    }
}

pub async fn insert_task<'c>(executor: impl PgExecutor<'c>, task: &Task) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO tasks (task_id, tenant_id, title, details, status, ts) VALUES ($1,$2,$3,$4,$5,$6)",
    )
    .bind(&task.task_id)
    .bind(&task.tenant_id)
    .bind(&task.title)
    .bind(&task.details)
    .bind(task.status.as_str())
    .bind(task.ts)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_task<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    task_id: &str,
) -> StoreResult<Task> {
    let row: TaskRow = sqlx::query_as("SELECT * FROM tasks WHERE tenant_id = $1 AND task_id = $2")
        .bind(tenant_id)
        .bind(task_id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("task {task_id}")))?;
    row.try_into()
}

/// Tasks for a tenant, most recently updated first. Used for the
/// `task_state` ACB section (§4.H step 3).
pub async fn list_tasks<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
) -> StoreResult<Vec<Task>> {
    let rows: Vec<TaskRow> =
        sqlx::query_as("SELECT * FROM tasks WHERE tenant_id = $1 ORDER BY ts DESC")
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Caller must check `Task::can_transition_to` before calling this; the
/// store layer persists whatever status it is given.
pub async fn update_task_status<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    task_id: &str,
    status: TaskStatus,
) -> StoreResult<()> {
    let result = sqlx::query("UPDATE tasks SET status = $1 WHERE tenant_id = $2 AND task_id = $3")
        .bind(status.as_str())
        .bind(tenant_id)
        .bind(task_id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("task {task_id}")));
    }
    Ok(())
}
