// Capsule endpoints (§6, §4.F): create, list available, fetch, revoke.
use std::collections::BTreeSet;

use axum::extract::{Path, Query, State};
use axum::Json;
use memoryd_capsules::CreateCapsuleInput;
use memoryd_model::{Capsule, CapsuleItems};
use serde::Deserialize;

use crate::auth::TenantId;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCapsuleBody {
    pub author_agent_id: String,
    pub scope: String,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
    #[serde(default)]
    pub audience_agent_ids: BTreeSet<String>,
    #[serde(default)]
    pub items: CapsuleItems,
    pub ttl_days: i32,
    #[serde(default)]
    pub risks: Vec<String>,
}

pub async fn create_capsule(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateCapsuleBody>,
) -> ApiResult<Json<Capsule>> {
    let input = CreateCapsuleInput {
        tenant_id,
        author_agent_id: body.author_agent_id,
        scope: body.scope,
        subject_type: body.subject_type,
        subject_id: body.subject_id,
        audience_agent_ids: body.audience_agent_ids,
        items: body.items,
        ttl_days: body.ttl_days,
        risks: body.risks,
    };
    let capsule = memoryd_capsules::create_capsule(&state.pool, input).await?;
    Ok(Json(capsule))
}

#[derive(Debug, Deserialize)]
pub struct ListCapsulesQuery {
    pub agent_id: String,
    #[serde(default)]
    pub subject_type: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
}

pub async fn list_capsules(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<ListCapsulesQuery>,
) -> ApiResult<Json<Vec<Capsule>>> {
    let capsules = memoryd_capsules::list_capsules(
        &state.pool,
        &tenant_id,
        &query.agent_id,
        query.subject_type.as_deref(),
        query.subject_id.as_deref(),
    )
    .await?;
    Ok(Json(capsules))
}

#[derive(Debug, Deserialize)]
pub struct GetCapsuleQuery {
    pub agent_id: String,
}

pub async fn get_capsule(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Path(capsule_id): Path<String>,
    Query(query): Query<GetCapsuleQuery>,
) -> ApiResult<Json<Capsule>> {
    let capsule =
        memoryd_capsules::get_capsule(&state.pool, &tenant_id, &capsule_id, &query.agent_id).await?;
    Ok(Json(capsule))
}

pub async fn revoke_capsule(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Path(capsule_id): Path<String>,
) -> ApiResult<()> {
    memoryd_capsules::revoke_capsule(&state.pool, &tenant_id, &capsule_id).await?;
    Ok(())
}
