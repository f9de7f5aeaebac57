// get_project_tasks (§6 wire surface, listed alongside the edge
// endpoints): the task model (§3) carries no `project_id` field, so a
// project's tasks are whichever task nodes a `has_task` edge connects the
// project node to — one hop, outgoing, via the same edge machinery as any
// other traversal. Edges of this type are created like any other
// `create_edge` call; this is a read convenience over them.
use sqlx::PgExecutor;

use crate::error::GraphResult;
use crate::traverse::{traverse, Direction};

pub const HAS_TASK_EDGE_TYPE: &str = "has_task";

pub async fn get_project_tasks<'c>(
    executor: impl PgExecutor<'c> + Copy,
    tenant_id: &str,
    project_node_id: &str,
) -> GraphResult<Vec<memoryd_model::Task>> {
    let task_node_ids = traverse(
        executor,
        tenant_id,
        project_node_id,
        HAS_TASK_EDGE_TYPE,
        Direction::Outgoing,
        1,
    )
    .await?;
    let mut tasks = Vec::with_capacity(task_node_ids.len());
    for task_id in task_node_ids {
        if let Ok(task) = memoryd_store::get_task(executor, tenant_id, &task_id).await {
            tasks.push(task);
        }
    }
    Ok(tasks)
}
