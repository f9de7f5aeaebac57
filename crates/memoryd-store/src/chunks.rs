// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use memoryd_model::{Channel, Chunk, ScopeLabels};
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct ChunkRow {
    chunk_id: String,
    tenant_id: String,
    event_id: String,
    ts: DateTime<Utc>,
    kind: String,
    channel: String,
    sensitivity: String,
    tags: serde_json::Value,
    token_est: i32,
    importance: f32,
    text: String,
    scope: Option<String>,
    subject_type: Option<String>,
    subject_id: Option<String>,
    project_id: Option<String>,
}

impl TryFrom<ChunkRow> for Chunk {
    type Error = StoreError;

    fn try_from(row: ChunkRow) -> Result<Self, Self::Error> {
        Ok(Chunk {
            chunk_id: row.chunk_id,
            tenant_id: row.tenant_id,
            event_id: row.event_id,
            ts: row.ts,
            kind: memoryd_model::parse_event_kind(&row.kind)
                .ok_or_else(|| StoreError::Conflict(format!("unknown kind: {}", row.kind)))?,
            channel: Channel::parse(&row.channel)
                .ok_or_else(|| StoreError::Conflict(format!("unknown channel: {}", row.channel)))?,
            sensitivity: memoryd_model::parse_sensitivity(&row.sensitivity).ok_or_else(|| {
                StoreError::Conflict(format!("unknown sensitivity: {}", row.sensitivity))
            })?,
            tags: serde_json::from_value(row.tags)?,
            token_est: row.token_est,
            importance: row.importance,
            text: row.text,
            labels: ScopeLabels {
                scope: row.scope,
                subject_type: row.subject_type,
                subject_id: row.subject_id,
                project_id: row.project_id,
            },
        })
    }
}

pub async fn insert_chunk<'c>(executor: impl PgExecutor<'c>, chunk: &Chunk) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO chunks (chunk_id, tenant_id, event_id, ts, kind, channel, sensitivity, \
         tags, token_est, importance, text, scope, subject_type, subject_id, project_id) \
         VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15)",
    )
    .bind(&chunk.chunk_id)
    .bind(&chunk.tenant_id)
    .bind(&chunk.event_id)
    .bind(chunk.ts)
    .bind(chunk.kind.as_str())
    .bind(chunk.channel.as_str())
    .bind(chunk.sensitivity.as_str())
    .bind(serde_json::to_value(&chunk.tags)?)
    .bind(chunk.token_est)
    .bind(chunk.importance)
    .bind(&chunk.text)
    .bind(&chunk.labels.scope)
    .bind(&chunk.labels.subject_type)
    .bind(&chunk.labels.subject_id)
    .bind(&chunk.labels.project_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_chunk<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    chunk_id: &str,
) -> StoreResult<Chunk> {
    let row: ChunkRow =
        sqlx::query_as("SELECT * FROM chunks WHERE tenant_id = $1 AND chunk_id = $2")
            .bind(tenant_id)
            .bind(chunk_id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("chunk {chunk_id}")))?;
    row.try_into()
}

/// All chunks belonging to one event, in insertion order. The current
/// contract yields at most one, but callers should not assume that.
pub async fn list_chunks_by_event<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    event_id: &str,
) -> StoreResult<Vec<Chunk>> {
    let rows: Vec<ChunkRow> =
        sqlx::query_as("SELECT * FROM chunks WHERE tenant_id = $1 AND event_id = $2 ORDER BY ts")
            .bind(tenant_id)
            .bind(event_id)
            .fetch_all(executor)
            .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

/// All chunks for a tenant, for the overlay layer to fold edits over. Bounded
/// retrieval (scope/search filters) happens in `memoryd-overlay`; this is the
/// raw row source it queries against. There is deliberately no store-level
/// full-text search over `chunks.text`: an `amend` edit can replace a
/// chunk's text entirely, so a match against the *stored* row can miss a
/// chunk that now matches (or keep one that no longer does) — the
/// tokenized match has to run on `effective_text` after the overlay fold,
/// which only `memoryd-overlay::search_chunks` can produce.
pub async fn list_chunks_by_tenant<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
) -> StoreResult<Vec<Chunk>> {
    let rows: Vec<ChunkRow> =
        sqlx::query_as("SELECT * FROM chunks WHERE tenant_id = $1 ORDER BY ts DESC")
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}
