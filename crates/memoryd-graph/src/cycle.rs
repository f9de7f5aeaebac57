// Cycle prevention for `depends_on` edges (§4.J): before inserting
// `from_node --depends_on--> to_node`, DFS from `to_node` along outgoing
// `depends_on` edges and check whether `from_node` is reachable. If it is,
// the new edge would close a cycle and insertion must be refused.
use std::collections::{HashMap, HashSet};

use memoryd_model::Edge;

pub fn would_create_cycle(edges: &[Edge], from_node_id: &str, to_node_id: &str) -> bool {
    if from_node_id == to_node_id {
        return true;
    }
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.from_node_id.as_str())
            .or_default()
            .push(edge.to_node_id.as_str());
    }
    let mut visited = HashSet::new();
    let mut stack = vec![to_node_id];
    while let Some(node) = stack.pop() {
        if node == from_node_id {
            return true;
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(neighbors) = adjacency.get(node) {
            stack.extend(neighbors.iter().copied());
        }
    }
    false
}
