// create_edge (§4.J): for `depends_on` edges, refuse insertion if it would
// close a cycle among existing `depends_on` edges.
use chrono::Utc;
use memoryd_core::{generate_id, EDGE_PREFIX};
use memoryd_model::{Edge, DEPENDS_ON};
use sqlx::PgExecutor;
use std::collections::HashMap;
use serde_json::Value;

use crate::cycle::would_create_cycle;
use crate::error::{GraphError, GraphResult};

pub async fn create_edge<'c>(
    executor: impl PgExecutor<'c> + Copy,
    tenant_id: &str,
    from_node_id: &str,
    to_node_id: &str,
    edge_type: &str,
    properties: HashMap<String, Value>,
) -> GraphResult<Edge> {
    if edge_type == DEPENDS_ON {
        let existing = memoryd_store::list_edges_by_type(executor, tenant_id, DEPENDS_ON).await?;
        if would_create_cycle(&existing, from_node_id, to_node_id) {
            return Err(GraphError::Conflict(format!(
                "depends_on edge {from_node_id} -> {to_node_id} would create a cycle"
            )));
        }
    }
    let edge = Edge {
        edge_id: generate_id(EDGE_PREFIX),
        tenant_id: tenant_id.to_string(),
        from_node_id: from_node_id.to_string(),
        to_node_id: to_node_id.to_string(),
        edge_type: edge_type.to_string(),
        properties,
        created_at: Utc::now(),
    };
    memoryd_store::insert_edge(executor, &edge).await?;
    Ok(edge)
}
