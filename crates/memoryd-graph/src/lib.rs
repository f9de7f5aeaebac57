// SPDX-License-Identifier: Apache-2.0
//! Component J: graph edges (§4.J) — create/read/mutate/delete edges
//! independent of the nodes they connect, `depends_on` cycle prevention,
//! bounded-depth traversal, and the `get_project_tasks` read convenience.
mod create;
mod cycle;
mod edges;
mod error;
mod project;
mod traverse;

pub use create::create_edge;
pub use cycle::would_create_cycle;
pub use edges::{delete_edge, get_edges, update_edge_properties};
pub use error::{GraphError, GraphResult};
pub use project::{get_project_tasks, HAS_TASK_EDGE_TYPE};
pub use traverse::{traverse, Direction};
