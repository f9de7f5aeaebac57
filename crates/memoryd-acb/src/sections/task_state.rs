// task_state section (§4.H step 3): a compact bulleted summary of open and
// doing tasks, emitted as a single item when it fits — never partially
// packed, since splitting the summary mid-bullet would leave it unreadable.
use memoryd_model::TaskStatus;
use sqlx::PgPool;

use crate::error::AcbResult;
use crate::response::{AcbItem, Omission, Section};

pub async fn build(
    pool: &PgPool,
    tenant_id: &str,
    local_budget: i32,
) -> AcbResult<(Section, Option<Omission>)> {
    let tasks = memoryd_store::list_tasks(pool, tenant_id).await?;
    let open: Vec<_> = tasks
        .into_iter()
        .filter(|t| matches!(t.status, TaskStatus::Open | TaskStatus::Doing))
        .collect();

    if open.is_empty() {
        return Ok((
            Section {
                name: "task_state",
                items: Vec::new(),
                token_est: 0,
            },
            None,
        ));
    }

    let text = open
        .iter()
        .map(|t| format!("- [{}] {}", t.status.as_str(), t.title))
        .collect::<Vec<_>>()
        .join("\n");
    let token_est = memoryd_core::estimate_tokens(&text);

    if token_est <= local_budget {
        let section = Section {
            name: "task_state",
            items: vec![AcbItem {
                source_id: None,
                text,
                token_est,
            }],
            token_est,
        };
        Ok((section, None))
    } else {
        let section = Section {
            name: "task_state",
            items: Vec::new(),
            token_est: 0,
        };
        Ok((
            section,
            Some(Omission {
                section: "task_state",
                omitted_count: 1,
            }),
        ))
    }
}
