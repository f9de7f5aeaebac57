// revokeCapsule (§4.F, §8): sets status=revoked atomically; a no-op (not an
// error) if the capsule is already in a terminal state.
use memoryd_model::CapsuleStatus;
use sqlx::PgExecutor;

use crate::error::CapsuleResult;

pub async fn revoke_capsule<'c>(
    executor: impl PgExecutor<'c> + Copy,
    tenant_id: &str,
    capsule_id: &str,
) -> CapsuleResult<()> {
    let capsule = memoryd_store::get_capsule(executor, tenant_id, capsule_id).await?;
    if matches!(capsule.status, CapsuleStatus::Revoked | CapsuleStatus::Expired) {
        return Ok(());
    }
    memoryd_store::update_capsule_status(executor, tenant_id, capsule_id, CapsuleStatus::Revoked)
        .await?;
    Ok(())
}
