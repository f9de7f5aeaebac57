// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use memoryd_model::{Actor, ActorType, Channel, Event, EventKind, ScopeLabels, Sensitivity};
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct EventRow {
    event_id: String,
    tenant_id: String,
    session_id: String,
    channel: String,
    actor_type: String,
    actor_id: String,
    kind: String,
    sensitivity: String,
    tags: serde_json::Value,
    content: serde_json::Value,
    refs: serde_json::Value,
    scope: Option<String>,
    subject_type: Option<String>,
    subject_id: Option<String>,
    project_id: Option<String>,
    ts: DateTime<Utc>,
}

fn actor_type_from_str(s: &str) -> StoreResult<ActorType> {
    ActorType::parse(s).ok_or_else(|| StoreError::Conflict(format!("unknown actor_type: {s}")))
}

fn event_kind_from_str(s: &str) -> StoreResult<EventKind> {
    memoryd_model::parse_event_kind(s)
        .ok_or_else(|| StoreError::Conflict(format!("unknown event kind: {s}")))
}

fn sensitivity_from_str(s: &str) -> StoreResult<Sensitivity> {
    memoryd_model::parse_sensitivity(s)
        .ok_or_else(|| StoreError::Conflict(format!("unknown sensitivity: {s}")))
}

impl TryFrom<EventRow> for Event {
    type Error = StoreError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Event {
            event_id: row.event_id,
            tenant_id: row.tenant_id,
            session_id: row.session_id,
            channel: Channel::parse(&row.channel)
                .ok_or_else(|| StoreError::Conflict(format!("unknown channel: {}", row.channel)))?,
            actor: Actor {
                actor_type: actor_type_from_str(&row.actor_type)?,
                id: row.actor_id,
            },
            kind: event_kind_from_str(&row.kind)?,
            sensitivity: sensitivity_from_str(&row.sensitivity)?,
            tags: serde_json::from_value(row.tags)?,
            content: row.content,
            refs: serde_json::from_value(row.refs)?,
            labels: ScopeLabels {
                scope: row.scope,
                subject_type: row.subject_type,
                subject_id: row.subject_id,
                project_id: row.project_id,
            },
            ts: row.ts,
        })
    }
}

/// Insert an event row. Callers pass either a pool or an open transaction
/// so `memoryd-ingest` can include this in the same atomic unit as its
/// chunk/artifact writes (§4.D).
pub async fn insert_event<'c>(executor: impl PgExecutor<'c>, event: &Event) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO events (event_id, tenant_id, session_id, channel, actor_type, actor_id, \
         kind, sensitivity, tags, content, refs, scope, subject_type, subject_id, project_id, ts) \
         VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)",
    )
    .bind(&event.event_id)
    .bind(&event.tenant_id)
    .bind(&event.session_id)
    .bind(event.channel.as_str())
    .bind(event.actor.actor_type.as_str())
    .bind(&event.actor.id)
    .bind(event.kind.as_str())
    .bind(event.sensitivity.as_str())
    .bind(serde_json::to_value(&event.tags)?)
    .bind(&event.content)
    .bind(serde_json::to_value(&event.refs)?)
    .bind(&event.labels.scope)
    .bind(&event.labels.subject_type)
    .bind(&event.labels.subject_id)
    .bind(&event.labels.project_id)
    .bind(event.ts)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_event<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    event_id: &str,
) -> StoreResult<Event> {
    let row: EventRow =
        sqlx::query_as("SELECT * FROM events WHERE tenant_id = $1 AND event_id = $2")
            .bind(tenant_id)
            .bind(event_id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("event {event_id}")))?;
    row.try_into()
}

/// The most recent events in (tenant, session), newest first. `memoryd-acb`
/// uses this to build the `recent_window` ACB section (§4.H step 3), then
/// filters by `allowed_sensitivity(channel)` itself.
pub async fn list_recent_events_by_session<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    session_id: &str,
    limit: i64,
) -> StoreResult<Vec<Event>> {
    let rows: Vec<EventRow> = sqlx::query_as(
        "SELECT * FROM events WHERE tenant_id = $1 AND session_id = $2 \
         ORDER BY ts DESC LIMIT $3",
    )
    .bind(tenant_id)
    .bind(session_id)
    .bind(limit)
    .fetch_all(executor)
    .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}
