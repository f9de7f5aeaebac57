// capsules section (§4.H step 3): one textual summary item per available
// capsule (§4.F), a fixed 50 tokens each, packed greedily until the local
// (already-zeroed-when-`!include_capsules`) budget runs out.
use sqlx::PgPool;

use crate::error::AcbResult;
use crate::pack::pack_greedy;
use crate::response::{CapsuleInclusion, Omission, Section};

const TOKENS_PER_CAPSULE: i32 = 50;

pub async fn build(
    pool: &PgPool,
    tenant_id: &str,
    agent_id: &str,
    subject_type: Option<&str>,
    subject_id: Option<&str>,
    local_budget: i32,
) -> AcbResult<(Section, Vec<CapsuleInclusion>, Option<Omission>)> {
    let capsules = memoryd_overlay::get_available_capsules(
        pool,
        tenant_id,
        agent_id,
        subject_type,
        subject_id,
    )
    .await?;

    let candidates = capsules
        .into_iter()
        .map(|c| {
            let summary = format!(
                "Capsule {}: {} chunks, {} decisions, {} artifacts; risks: {}",
                c.capsule_id,
                c.items.chunks.len(),
                c.items.decisions.len(),
                c.items.artifacts.len(),
                if c.risks.is_empty() {
                    "none".to_string()
                } else {
                    c.risks.join(", ")
                }
            );
            (Some(c.capsule_id), summary, TOKENS_PER_CAPSULE)
        })
        .collect();

    let (items, used, omitted) = pack_greedy(local_budget, candidates);
    let included: Vec<CapsuleInclusion> = items
        .iter()
        .map(|item| CapsuleInclusion {
            capsule_id: item.source_id.clone().unwrap_or_default(),
            token_est: item.token_est,
        })
        .collect();

    let section = Section {
        name: "capsules",
        items,
        token_est: used,
    };
    let omission = (omitted > 0).then_some(Omission {
        section: "capsules",
        omitted_count: omitted,
    });
    Ok((section, included, omission))
}
