// recent_window section (§4.H step 3): up to 20 most recent (tenant,
// session) events whose sensitivity is allowed on the request channel,
// rendered as "User: …" / "Agent: …" / "Decision: …" and packed
// newest-first.
use memoryd_core::{allowed_sensitivity, estimate_tokens};
use memoryd_model::{ActorType, Channel, EventContent, EventKind};
use sqlx::PgPool;

use crate::error::AcbResult;
use crate::pack::pack_greedy;
use crate::response::{Omission, Section};

const MAX_CANDIDATES: i64 = 100;
const MAX_EVENTS: usize = 20;

fn render(kind: EventKind, actor_type: ActorType, text: String) -> String {
    if kind == EventKind::Decision {
        format!("Decision: {text}")
    } else if actor_type == ActorType::Human {
        format!("User: {text}")
    } else {
        format!("Agent: {text}")
    }
}

pub async fn build(
    pool: &PgPool,
    tenant_id: &str,
    session_id: &str,
    channel: Channel,
    local_budget: i32,
) -> AcbResult<(Section, Option<Omission>)> {
    let allowed = allowed_sensitivity(channel);
    let events =
        memoryd_store::list_recent_events_by_session(pool, tenant_id, session_id, MAX_CANDIDATES)
            .await?;

    let rendered: Vec<(Option<String>, String, i32)> = events
        .into_iter()
        .filter(|e| e.sensitivity <= allowed)
        .filter_map(|e| {
            let content = EventContent::from_kind_and_value(e.kind, e.content.clone()).ok()?;
            let text = content.chunk_source_text()?;
            let rendered = render(e.kind, e.actor.actor_type, text);
            let token_est = estimate_tokens(&rendered);
            Some((Some(e.event_id), rendered, token_est))
        })
        .take(MAX_EVENTS)
        .collect();

    let (items, used, omitted) = pack_greedy(local_budget, rendered);
    let section = Section {
        name: "recent_window",
        items,
        token_est: used,
    };
    let omission = (omitted > 0).then_some(Omission {
        section: "recent_window",
        omitted_count: omitted,
    });
    Ok((section, omission))
}
