// get_edges, update_edge_properties, delete_edge (§4.J, §6): thin
// pass-throughs over `memoryd-store`'s edge repository, kept here so
// callers depend on one crate for the whole edge surface rather than
// reaching into `memoryd-store` directly for some operations and
// `memoryd-graph` for others.
use std::collections::HashMap;

use memoryd_model::Edge;
use serde_json::Value;
use sqlx::PgExecutor;

use crate::error::GraphResult;
use crate::traverse::Direction;

pub async fn get_edges<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    node_id: &str,
    direction: Direction,
) -> GraphResult<Vec<Edge>> {
    let outgoing = matches!(direction, Direction::Outgoing);
    Ok(memoryd_store::list_edges_for_node(executor, tenant_id, node_id, outgoing).await?)
}

pub async fn update_edge_properties<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edge_id: &str,
    properties: &HashMap<String, Value>,
) -> GraphResult<()> {
    Ok(memoryd_store::update_edge_properties(executor, tenant_id, edge_id, properties).await?)
}

pub async fn delete_edge<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edge_id: &str,
) -> GraphResult<()> {
    Ok(memoryd_store::delete_edge(executor, tenant_id, edge_id).await?)
}
