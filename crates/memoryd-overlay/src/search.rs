// SPDX-License-Identifier: Apache-2.0
use std::collections::HashMap;

use memoryd_model::{Channel, EditTargetType, MemoryEdit};
use sqlx::PgPool;

use crate::effective::{fold_chunk, EffectiveChunk};
use crate::error::OverlayResult;
use crate::tsquery::build_tsquery;

/// Optional narrowing criteria for `search_chunks` (§4.E rule 2).
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub scope: Option<String>,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub project_id: Option<String>,
    pub include_quarantined: bool,
    pub channel: Option<Channel>,
    pub limit: usize,
}

fn edits_by_chunk(edits: Vec<MemoryEdit>) -> HashMap<String, Vec<MemoryEdit>> {
    let mut grouped: HashMap<String, Vec<MemoryEdit>> = HashMap::new();
    for edit in edits {
        if edit.target_type == EditTargetType::Chunk {
            grouped.entry(edit.target_id.clone()).or_default().push(edit);
        }
    }
    grouped
}

/// Every `&`-joined token in `tsquery` must appear as a substring of
/// `effective_text` (case-insensitive), mirroring the AND-match
/// `relevant_decisions.rs` applies for decisions — the same tokenizer,
/// just run against text that only exists after the edit fold.
fn matches_tsquery(effective_text: &str, tsquery: &str) -> bool {
    let haystack = effective_text.to_lowercase();
    tsquery
        .split(" & ")
        .filter(|t| !t.is_empty())
        .all(|token| haystack.contains(token))
}

/// Full-text search over effective chunks (§4.E rule 2). The match is
/// evaluated against `effective_text` *after* the edit overlay is folded,
/// never against a chunk's stored text directly: an approved `amend` can
/// replace that text outright, so filtering on the stored row first would
/// miss a chunk newly matching the query (or wrongly keep one that no
/// longer does). Candidates therefore come from every chunk in the
/// tenant, folded first, then matched and ranked on the effective values.
pub async fn search_chunks(
    pool: &PgPool,
    tenant_id: &str,
    query_text: &str,
    filters: &SearchFilters,
) -> OverlayResult<Vec<EffectiveChunk>> {
    let tsquery = build_tsquery(query_text);
    if tsquery.is_empty() {
        return Ok(Vec::new());
    }

    let chunks = memoryd_store::list_chunks_by_tenant(pool, tenant_id).await?;
    let edits = edits_by_chunk(memoryd_store::list_approved_edits(pool, tenant_id).await?);

    let mut results: Vec<EffectiveChunk> = chunks
        .iter()
        .filter_map(|chunk| {
            let chunk_edits = edits.get(&chunk.chunk_id).map(Vec::as_slice).unwrap_or(&[]);
            fold_chunk(chunk, chunk_edits)
        })
        .filter(|effective| matches_tsquery(&effective.effective_text, &tsquery))
        .filter(|effective| {
            if let Some(channel) = filters.channel {
                if effective.sensitivity > memoryd_core::allowed_sensitivity(channel) {
                    return false;
                }
                if effective.blocked_channels.contains(channel.as_str()) {
                    return false;
                }
            }
            if !filters.include_quarantined && effective.is_quarantined {
                return false;
            }
            if let Some(scope) = &filters.scope {
                if effective.labels.scope.as_deref() != Some(scope.as_str()) {
                    return false;
                }
            }
            if let Some(subject_type) = &filters.subject_type {
                if effective.labels.subject_type.as_deref() != Some(subject_type.as_str()) {
                    return false;
                }
            }
            if let Some(subject_id) = &filters.subject_id {
                if effective.labels.subject_id.as_deref() != Some(subject_id.as_str()) {
                    return false;
                }
            }
            if let Some(project_id) = &filters.project_id {
                if effective.labels.project_id.as_deref() != Some(project_id.as_str()) {
                    return false;
                }
            }
            true
        })
        .collect();

    // Tie-break on chunk_id ASC last so ordering is total and reproducible
    // across requests with identical inputs (§9 ACB stability).
    results.sort_by(|a, b| {
        b.effective_importance
            .partial_cmp(&a.effective_importance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.ts.cmp(&a.ts))
            .then_with(|| a.chunk_id.cmp(&b.chunk_id))
    });

    if filters.limit > 0 {
        results.truncate(filters.limit);
    }

    Ok(results)
}
