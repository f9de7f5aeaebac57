// traverse (§4.J): nodes reachable from `node_id` within `depth` hops along
// edges of `edge_type` in `direction`.
use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::error::GraphResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Outgoing,
    Incoming,
}

pub async fn traverse<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    node_id: &str,
    edge_type: &str,
    direction: Direction,
    depth: u32,
) -> GraphResult<Vec<String>> {
    let edges = memoryd_store::list_edges_by_type(executor, tenant_id, edge_type).await?;
    let mut visited = HashSet::new();
    visited.insert(node_id.to_string());
    let mut frontier = VecDeque::new();
    frontier.push_back((node_id.to_string(), 0u32));
    let mut reachable = Vec::new();

    while let Some((current, hops)) = frontier.pop_front() {
        if hops >= depth {
            continue;
        }
        for edge in &edges {
            let neighbor = match direction {
                Direction::Outgoing if edge.from_node_id == current => Some(&edge.to_node_id),
                Direction::Incoming if edge.to_node_id == current => Some(&edge.from_node_id),
                _ => None,
            };
            if let Some(neighbor) = neighbor {
                if visited.insert(neighbor.clone()) {
                    reachable.push(neighbor.clone());
                    frontier.push_back((neighbor.clone(), hops + 1));
                }
            }
        }
    }
    Ok(reachable)
}
