// getCapsule (§4.F): 404 (here, `CapsuleError::NotFound`) when not found,
// not active, expired, or the requester is outside the audience — unless
// the requester is the author, who may always read their own capsule.
use chrono::Utc;
use memoryd_model::Capsule;
use sqlx::PgExecutor;

use crate::error::{CapsuleError, CapsuleResult};

pub async fn get_capsule<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    capsule_id: &str,
    requester_agent_id: &str,
) -> CapsuleResult<Capsule> {
    let capsule = memoryd_store::get_capsule(executor, tenant_id, capsule_id)
        .await
        .map_err(|_| CapsuleError::NotFound)?;
    let now = Utc::now();
    if capsule.author_agent_id == requester_agent_id {
        return Ok(capsule);
    }
    if capsule.is_unavailable(now) || !capsule.is_visible_to(requester_agent_id) {
        return Err(CapsuleError::NotFound);
    }
    Ok(capsule)
}
