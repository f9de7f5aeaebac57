// SPDX-License-Identifier: Apache-2.0
use chrono::{DateTime, Utc};
use memoryd_model::Edge;
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct EdgeRow {
    edge_id: String,
    tenant_id: String,
    from_node_id: String,
    to_node_id: String,
    #[sqlx(rename = "type")]
    edge_type: String,
    properties: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<EdgeRow> for Edge {
    type Error = StoreError;

    fn try_from(row: EdgeRow) -> Result<Self, Self::Error> {
        Ok(Edge {
            edge_id: row.edge_id,
            tenant_id: row.tenant_id,
            from_node_id: row.from_node_id,
            to_node_id: row.to_node_id,
            edge_type: row.edge_type,
            properties: serde_json::from_value(row.properties)?,
            created_at: row.created_at,
        })
    }
}

pub async fn insert_edge<'c>(executor: impl PgExecutor<'c>, edge: &Edge) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO edges (edge_id, tenant_id, from_node_id, to_node_id, type, properties, created_at) \
         VALUES ($1,$2,$3,$4,$5,$6,$7)",
    )
    .bind(&edge.edge_id)
    .bind(&edge.tenant_id)
    .bind(&edge.from_node_id)
    .bind(&edge.to_node_id)
    .bind(&edge.edge_type)
    .bind(serde_json::to_value(&edge.properties)?)
    .bind(edge.created_at)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_edge<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edge_id: &str,
) -> StoreResult<Edge> {
    let row: EdgeRow = sqlx::query_as("SELECT * FROM edges WHERE tenant_id = $1 AND edge_id = $2")
        .bind(tenant_id)
        .bind(edge_id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("edge {edge_id}")))?;
    row.try_into()
}

/// All edges of `edge_type` for a tenant. `memoryd-graph` loads the full
/// `depends_on` subgraph this way before running its cycle-detection DFS
/// (§4.J), rather than pushing recursive traversal into SQL.
pub async fn list_edges_by_type<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edge_type: &str,
) -> StoreResult<Vec<Edge>> {
    let rows: Vec<EdgeRow> =
        sqlx::query_as("SELECT * FROM edges WHERE tenant_id = $1 AND type = $2")
            .bind(tenant_id)
            .bind(edge_type)
            .fetch_all(executor)
            .await?;
    rows.into_iter().map(TryInto::try_into).collect()
}

/// Edges touching `node_id` in `direction` (outgoing: from, incoming: to).
pub async fn list_edges_for_node<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    node_id: &str,
    outgoing: bool,
) -> StoreResult<Vec<Edge>> {
    let rows: Vec<EdgeRow> = if outgoing {
        sqlx::query_as("SELECT * FROM edges WHERE tenant_id = $1 AND from_node_id = $2")
            .bind(tenant_id)
            .bind(node_id)
            .fetch_all(executor)
            .await?
    } else {
        sqlx::query_as("SELECT * FROM edges WHERE tenant_id = $1 AND to_node_id = $2")
            .bind(tenant_id)
            .bind(node_id)
            .fetch_all(executor)
            .await?
    };
    rows.into_iter().map(TryInto::try_into).collect()
}

pub async fn delete_edge<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edge_id: &str,
) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM edges WHERE tenant_id = $1 AND edge_id = $2")
        .bind(tenant_id)
        .bind(edge_id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("edge {edge_id}")));
    }
    Ok(())
}

pub async fn update_edge_properties<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    edge_id: &str,
    properties: &std::collections::HashMap<String, serde_json::Value>,
) -> StoreResult<()> {
    let result = sqlx::query("UPDATE edges SET properties = $1 WHERE tenant_id = $2 AND edge_id = $3")
        .bind(serde_json::to_value(properties)?)
        .bind(tenant_id)
        .bind(edge_id)
        .execute(executor)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(format!("edge {edge_id}")));
    }
    Ok(())
}
