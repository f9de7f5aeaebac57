// listCapsules (§4.F): delegates to §4.E rule 5, i.e. `memoryd-overlay`'s
// `get_available_capsules`. This crate doesn't duplicate the audience/
// expiry filter; it only owns create/get/revoke/sweep.
use memoryd_model::Capsule;
use sqlx::PgPool;

use crate::error::CapsuleResult;

pub async fn list_capsules(
    pool: &PgPool,
    tenant_id: &str,
    agent_id: &str,
    subject_type: Option<&str>,
    subject_id: Option<&str>,
) -> CapsuleResult<Vec<Capsule>> {
    Ok(memoryd_overlay::get_available_capsules(
        pool,
        tenant_id,
        agent_id,
        subject_type,
        subject_id,
    )
    .await?)
}
