// createCapsule (§4.F): validate that every referenced chunk/decision/
// artifact belongs to the requesting tenant, compute expires_at from
// ttl_days, and persist with status=active.
use chrono::Utc;
use memoryd_core::{generate_id, CAPSULE_PREFIX};
use memoryd_model::{Capsule, CapsuleItems, CapsuleStatus};
use sqlx::PgExecutor;

use crate::error::{CapsuleError, CapsuleResult};

pub const MIN_TTL_DAYS: i32 = 1;

pub struct CreateCapsuleInput {
    pub tenant_id: String,
    pub author_agent_id: String,
    pub scope: String,
    pub subject_type: Option<String>,
    pub subject_id: Option<String>,
    pub audience_agent_ids: std::collections::BTreeSet<String>,
    pub items: CapsuleItems,
    pub ttl_days: i32,
    pub risks: Vec<String>,
}

pub async fn create_capsule<'c>(
    executor: impl PgExecutor<'c> + Copy,
    input: CreateCapsuleInput,
) -> CapsuleResult<Capsule> {
    if input.ttl_days < MIN_TTL_DAYS {
        return Err(CapsuleError::Validation(format!(
            "ttl_days must be >= {MIN_TTL_DAYS}, got {}",
            input.ttl_days
        )));
    }
    validate_same_tenant_refs(executor, &input.tenant_id, &input.items).await?;

    let created_at = Utc::now();
    let capsule = Capsule {
        capsule_id: generate_id(CAPSULE_PREFIX),
        tenant_id: input.tenant_id,
        scope: input.scope,
        subject_type: input.subject_type,
        subject_id: input.subject_id,
        author_agent_id: input.author_agent_id,
        audience_agent_ids: input.audience_agent_ids,
        items: input.items,
        risks: input.risks,
        ttl_days: input.ttl_days,
        status: CapsuleStatus::Active,
        created_at,
        expires_at: Capsule::expires_at_from(created_at, input.ttl_days),
    };
    memoryd_store::insert_capsule(executor, &capsule).await?;
    Ok(capsule)
}

async fn validate_same_tenant_refs<'c>(
    executor: impl PgExecutor<'c> + Copy,
    tenant_id: &str,
    items: &CapsuleItems,
) -> CapsuleResult<()> {
    for chunk_id in &items.chunks {
        memoryd_store::get_chunk(executor, tenant_id, chunk_id)
            .await
            .map_err(|_| {
                CapsuleError::Validation(format!("chunk {chunk_id} not found in tenant"))
            })?;
    }
    for decision_id in &items.decisions {
        memoryd_store::get_decision(executor, tenant_id, decision_id)
            .await
            .map_err(|_| {
                CapsuleError::Validation(format!("decision {decision_id} not found in tenant"))
            })?;
    }
    for artifact_id in &items.artifacts {
        memoryd_store::get_artifact(executor, tenant_id, artifact_id)
            .await
            .map_err(|_| {
                CapsuleError::Validation(format!("artifact {artifact_id} not found in tenant"))
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_below_minimum_is_rejected() {
        let input = CreateCapsuleInput {
            tenant_id: "t1".into(),
            author_agent_id: "a1".into(),
            scope: "session".into(),
            subject_type: None,
            subject_id: None,
            audience_agent_ids: Default::default(),
            items: CapsuleItems::default(),
            ttl_days: 0,
            risks: vec![],
        };
        assert!(input.ttl_days < MIN_TTL_DAYS);
    }
}
