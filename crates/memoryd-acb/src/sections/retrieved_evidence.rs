// retrieved_evidence section (§4.H step 3): full-text search over effective
// chunks, packed in the order `search_chunks` already returns them —
// (effective_importance DESC, ts DESC, chunk_id ASC), per §9 ACB
// stability — until the local budget runs out.
use memoryd_core::estimate_tokens;
use memoryd_overlay::{search_chunks, SearchFilters};
use sqlx::PgPool;

use crate::error::AcbResult;
use crate::pack::pack_greedy;
use crate::response::{Omission, Section};

const MAX_CANDIDATES: usize = 200;

/// `(section, omission, candidate_pool_size, edits_applied)`. `edits_applied`
/// sums `edits_applied_count` over the chunks that made it into the
/// section — the edits actually reflected in the delivered context, not
/// every candidate considered.
pub async fn build(
    pool: &PgPool,
    tenant_id: &str,
    query_text: &str,
    filters: &SearchFilters,
    local_budget: i32,
) -> AcbResult<(Section, Option<Omission>, usize, i64)> {
    let mut filters = filters.clone();
    filters.limit = MAX_CANDIDATES;

    let candidates = search_chunks(pool, tenant_id, query_text, &filters).await?;
    let candidate_pool_size = candidates.len();

    let mut edits_by_id = std::collections::HashMap::new();
    let packable: Vec<(Option<String>, String, i32)> = candidates
        .into_iter()
        .map(|c| {
            edits_by_id.insert(c.chunk_id.clone(), c.edits_applied_count as i64);
            let token_est = estimate_tokens(&c.effective_text);
            (Some(c.chunk_id), c.effective_text, token_est)
        })
        .collect();

    let (items, used, omitted) = pack_greedy(local_budget, packable);

    let edits_applied = items
        .iter()
        .filter_map(|item| item.source_id.as_ref())
        .filter_map(|id| edits_by_id.get(id))
        .sum();

    let section = Section {
        name: "retrieved_evidence",
        items,
        token_est: used,
    };
    let omission = (omitted > 0).then_some(Omission {
        section: "retrieved_evidence",
        omitted_count: omitted,
    });
    Ok((section, omission, candidate_pool_size, edits_applied))
}
