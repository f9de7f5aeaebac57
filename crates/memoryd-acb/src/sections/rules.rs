// rules section (§4.H step 3, first): tenant rules applicable to the
// request's channel, highest priority first, packed greedily.
use memoryd_model::Channel;
use sqlx::PgPool;

use crate::error::AcbResult;
use crate::pack::pack_greedy;
use crate::response::{Omission, Section};

pub async fn build(
    pool: &PgPool,
    tenant_id: &str,
    channel: Channel,
    local_budget: i32,
) -> AcbResult<(Section, Option<Omission>)> {
    let mut rules = memoryd_store::list_rules(pool, tenant_id).await?;
    rules.retain(|r| r.applies_to_channel(channel.as_str()));
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));

    let candidates = rules
        .into_iter()
        .map(|r| (Some(r.rule_id), r.content, r.token_est))
        .collect();
    let (items, used, omitted) = pack_greedy(local_budget, candidates);

    let section = Section {
        name: "rules",
        items,
        token_est: used,
    };
    let omission = (omitted > 0).then_some(Omission {
        section: "rules",
        omitted_count: omitted,
    });
    Ok((section, omission))
}
