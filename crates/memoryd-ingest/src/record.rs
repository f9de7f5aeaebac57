// recordEvent (§4.D): validate, apply privacy coercion, offload an
// oversize tool_result artifact, chunk, and persist event + chunk(s) +
// artifact atomically. Any failure rolls back the whole transaction.
use chrono::Utc;
use memoryd_core::{generate_id, EVENT_PREFIX};
use memoryd_model::{Event, EventContent, EventInput};
use sqlx::PgPool;

use crate::error::{IngestError, IngestResult};
use crate::offload::offload_if_oversize;
use crate::privacy::apply_privacy_coercion;

#[derive(Debug, Clone)]
pub struct RecordEventResult {
    pub event_id: String,
    pub chunk_ids: Vec<String>,
    pub artifact_id: Option<String>,
}

pub async fn record_event(
    pool: &PgPool,
    input: EventInput,
    secret_scanning_enabled: bool,
) -> IngestResult<RecordEventResult> {
    let (channel, kind, detected_sensitivity) = input.validate()?;

    let mut content = EventContent::from_kind_and_value(kind, input.content.clone())
        .map_err(|e| IngestError::Validation(memoryd_model::ValidationError::single("content", e.to_string())))?;

    let sensitivity =
        apply_privacy_coercion(&mut content, detected_sensitivity, secret_scanning_enabled);

    let artifact = if let EventContent::ToolResult(tool_result) = &mut content {
        offload_if_oversize(&input.tenant_id, tool_result)
    } else {
        None
    };

    let event = Event {
        event_id: generate_id(EVENT_PREFIX),
        tenant_id: input.tenant_id.clone(),
        session_id: input.session_id.clone(),
        channel,
        actor: input.actor.clone(),
        kind,
        sensitivity,
        tags: input.tags.clone(),
        content: serde_json::to_value(&content).map_err(|e| {
            IngestError::Validation(memoryd_model::ValidationError::single("content", e.to_string()))
        })?,
        refs: input.refs.clone(),
        labels: input.labels.clone(),
        ts: Utc::now(),
    };

    let chunks = memoryd_core::chunk_event(&event, &content);

    let mut tx = pool.begin().await.map_err(memoryd_store::StoreError::from)?;

    memoryd_store::insert_event(&mut *tx, &event).await?;
    if let Some(artifact) = &artifact {
        memoryd_store::insert_artifact(&mut *tx, artifact).await?;
    }
    for chunk in &chunks {
        memoryd_store::insert_chunk(&mut *tx, chunk).await?;
    }

    tx.commit().await.map_err(memoryd_store::StoreError::from)?;

    Ok(RecordEventResult {
        event_id: event.event_id,
        chunk_ids: chunks.into_iter().map(|c| c.chunk_id).collect(),
        artifact_id: artifact.map(|a| a.artifact_id),
    })
}
