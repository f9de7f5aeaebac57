// SPDX-License-Identifier: Apache-2.0
use memoryd_model::{scope_precedence, Decision, DecisionStatus};
use sqlx::PgPool;

use crate::error::OverlayResult;

/// Active decisions ranked by scope precedence then recency (§4.E rule 4):
/// policy=4 > project=3 > user=2 > session=1.
pub async fn get_active_decisions(pool: &PgPool, tenant_id: &str) -> OverlayResult<Vec<Decision>> {
    let mut decisions =
        memoryd_store::list_decisions_by_status(pool, tenant_id, DecisionStatus::Active).await?;
    decisions.sort_by(|a, b| {
        scope_precedence(b.labels.scope.as_deref())
            .cmp(&scope_precedence(a.labels.scope.as_deref()))
            .then_with(|| b.ts.cmp(&a.ts))
    });
    Ok(decisions)
}
