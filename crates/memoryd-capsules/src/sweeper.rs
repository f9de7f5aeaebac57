// Expiry sweeper (§4.F): transitions `active` capsules whose `expires_at`
// has passed to `expired`, purely for observability — reads never depend
// on this having run (`Capsule::is_unavailable` checks `expires_at`
// directly). Idempotent: sweeping twice in a row is a no-op the second
// time since the first pass already moved them out of `active`.
use std::time::Duration;

use chrono::Utc;
use memoryd_model::CapsuleStatus;
use sqlx::PgPool;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CapsuleResult;

pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// One sweep pass across every tenant: find every `active` capsule past
/// its `expires_at` and flip it to `expired`. Returns the number
/// transitioned.
pub async fn sweep_expired_capsules(pool: &PgPool) -> CapsuleResult<usize> {
    let now = Utc::now();
    let expired = memoryd_store::list_expired_active_capsules(pool, now).await?;
    let count = expired.len();
    for capsule in &expired {
        memoryd_store::update_capsule_status(
            pool,
            &capsule.tenant_id,
            &capsule.capsule_id,
            CapsuleStatus::Expired,
        )
        .await?;
    }
    Ok(count)
}

/// Run the sweeper on a fixed interval until `shutdown` fires. A failed
/// pass is logged and does not stop the loop — the next tick retries.
pub async fn run_periodic_sweep(
    pool: PgPool,
    interval_duration: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval_duration);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match sweep_expired_capsules(&pool).await {
                    Ok(n) if n > 0 => debug!(count = n, "swept expired capsules"),
                    Ok(_) => {}
                    Err(err) => warn!(error = %err, "capsule expiry sweep failed"),
                }
            }
            _ = shutdown.changed() => {
                return;
            }
        }
    }
}
