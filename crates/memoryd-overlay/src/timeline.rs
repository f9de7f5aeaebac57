// SPDX-License-Identifier: Apache-2.0
use std::collections::HashMap;

use chrono::Duration;
use memoryd_model::{EditTargetType, MemoryEdit};
use sqlx::PgPool;

use crate::effective::{fold_chunk, EffectiveChunk};
use crate::error::{OverlayError, OverlayResult};

/// An effective chunk's position relative to `center_chunk_id` (§4.E rule 3).
#[derive(Debug, Clone)]
pub struct TimelineEntry {
    pub chunk: EffectiveChunk,
    pub distance_seconds: i64,
}

/// Chunks within `±window_seconds` of `center_chunk_id`'s timestamp (§4.E
/// rule 3), ordered by absolute distance then ts ascending.
pub async fn get_timeline(
    pool: &PgPool,
    tenant_id: &str,
    center_chunk_id: &str,
    window_seconds: i64,
) -> OverlayResult<Vec<TimelineEntry>> {
    let center = memoryd_store::get_chunk(pool, tenant_id, center_chunk_id)
        .await
        .map_err(OverlayError::Store)?;

    let all_chunks = memoryd_store::list_chunks_by_tenant(pool, tenant_id).await?;
    let edits = memoryd_store::list_approved_edits(pool, tenant_id).await?;
    let mut grouped: HashMap<String, Vec<MemoryEdit>> = HashMap::new();
    for edit in &edits {
        if edit.target_type == EditTargetType::Chunk {
            grouped.entry(edit.target_id.clone()).or_default().push(edit.clone());
        }
    }

    let window = Duration::seconds(window_seconds);
    let lower = center.ts - window;
    let upper = center.ts + window;

    let mut entries: Vec<TimelineEntry> = all_chunks
        .iter()
        .filter(|c| c.ts >= lower && c.ts <= upper)
        .filter_map(|c| {
            let chunk_edits = grouped.get(&c.chunk_id).map(Vec::as_slice).unwrap_or(&[]);
            let effective = fold_chunk(c, chunk_edits)?;
            let distance_seconds = (c.ts - center.ts).num_seconds();
            Some(TimelineEntry {
                chunk: effective,
                distance_seconds,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.distance_seconds
            .abs()
            .cmp(&b.distance_seconds.abs())
            .then_with(|| a.chunk.ts.cmp(&b.chunk.ts))
    });

    Ok(entries)
}
