// Graph endpoints (§4.J, §6): create_edge, get_edges, update_edge_properties,
// delete_edge, traverse, get_project_tasks.
use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use memoryd_graph::Direction;
use memoryd_model::{Edge, Task};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::TenantId;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEdgeBody {
    pub from_node_id: String,
    pub to_node_id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

pub async fn create_edge(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Json(body): Json<CreateEdgeBody>,
) -> ApiResult<Json<Edge>> {
    let edge = memoryd_graph::create_edge(
        &state.pool,
        &tenant_id,
        &body.from_node_id,
        &body.to_node_id,
        &body.edge_type,
        body.properties,
    )
    .await?;
    Ok(Json(edge))
}

#[derive(Debug, Deserialize)]
pub struct GetEdgesQuery {
    pub node_id: String,
    #[serde(default = "default_direction")]
    pub direction: Direction,
}

fn default_direction() -> Direction {
    Direction::Outgoing
}

pub async fn get_edges(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<GetEdgesQuery>,
) -> ApiResult<Json<Vec<Edge>>> {
    let edges =
        memoryd_graph::get_edges(&state.pool, &tenant_id, &query.node_id, query.direction).await?;
    Ok(Json(edges))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEdgePropertiesBody {
    pub properties: HashMap<String, Value>,
}

pub async fn update_edge_properties(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Path(edge_id): Path<String>,
    Json(body): Json<UpdateEdgePropertiesBody>,
) -> ApiResult<()> {
    memoryd_graph::update_edge_properties(&state.pool, &tenant_id, &edge_id, &body.properties)
        .await?;
    Ok(())
}

pub async fn delete_edge(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Path(edge_id): Path<String>,
) -> ApiResult<()> {
    memoryd_graph::delete_edge(&state.pool, &tenant_id, &edge_id).await?;
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct TraverseQuery {
    pub node_id: String,
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(default = "default_direction")]
    pub direction: Direction,
    pub depth: u32,
}

pub async fn traverse(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<TraverseQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let nodes = memoryd_graph::traverse(
        &state.pool,
        &tenant_id,
        &query.node_id,
        &query.edge_type,
        query.direction,
        query.depth,
    )
    .await?;
    Ok(Json(nodes))
}

#[derive(Debug, Deserialize)]
pub struct ProjectTasksQuery {
    pub project_node_id: String,
}

pub async fn get_project_tasks(
    State(state): State<AppState>,
    TenantId(tenant_id): TenantId,
    Query(query): Query<ProjectTasksQuery>,
) -> ApiResult<Json<Vec<Task>>> {
    let tasks =
        memoryd_graph::get_project_tasks(&state.pool, &tenant_id, &query.project_node_id).await?;
    Ok(Json(tasks))
}
