// SPDX-License-Identifier: Apache-2.0
use chrono::Utc;
use memoryd_model::{Capsule, CapsuleStatus};
use sqlx::PgPool;

use crate::error::OverlayResult;

/// Capsules available to `agent_id` right now (§4.E rule 5): active,
/// unexpired, `agent_id` in the audience, and matching `subject_type`/
/// `subject_id` when given. Checks `expires_at` directly rather than
/// trusting `status`, since the sweeper may not have run yet (§4.F).
pub async fn get_available_capsules(
    pool: &PgPool,
    tenant_id: &str,
    agent_id: &str,
    subject_type: Option<&str>,
    subject_id: Option<&str>,
) -> OverlayResult<Vec<Capsule>> {
    let now = Utc::now();
    let capsules = memoryd_store::list_capsules(pool, tenant_id).await?;
    Ok(capsules
        .into_iter()
        .filter(|c| matches!(c.status, CapsuleStatus::Active))
        .filter(|c| c.expires_at > now)
        .filter(|c| c.audience_agent_ids.contains(agent_id))
        .filter(|c| match subject_type {
            Some(st) => c.subject_type.as_deref() == Some(st),
            None => true,
        })
        .filter(|c| match subject_id {
            Some(sid) => c.subject_id.as_deref() == Some(sid),
            None => true,
        })
        .collect())
}
