//! Exercises the repository functions against a live Postgres instance.
//!
//! Requires a running database with migrations applied:
//! ```sh
//! DATABASE_URL="postgres://localhost/memoryd_test" \
//!   cargo test -p memoryd-store --test store_integration -- --ignored
//! ```
use anyhow::Result;
use chrono::Utc;
use memoryd_model::{
    Actor, ActorType, Capsule, CapsuleItems, CapsuleScope, CapsuleStatus, Channel, Chunk, Decision,
    DecisionStatus, Edge, EditOp, EditStatus, EditTargetType, Event, EventKind, MemoryEdit, Rule,
    ScopeLabels, Sensitivity, Task, TaskStatus,
};
use sqlx::PgPool;
use uuid::Uuid;

struct TestDb {
    pool: PgPool,
    tenant_id: String,
}

impl TestDb {
    async fn new() -> Result<Self> {
        let url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/memoryd_test".into());
        let pool = PgPool::connect(&url).await?;
        memoryd_store::migrate(&pool).await?;
        let tenant_id = format!("it_{}", &Uuid::new_v4().simple().to_string()[..8]);
        Ok(Self { pool, tenant_id })
    }

    async fn cleanup(&self) {
        for table in [
            "edges", "capsules", "memory_edits", "rules", "tasks", "decisions", "chunks",
            "artifacts", "events",
        ] {
            let _ = sqlx::query(&format!("DELETE FROM {table} WHERE tenant_id = $1"))
                .bind(&self.tenant_id)
                .execute(&self.pool)
                .await;
        }
    }
}

fn test_event(tenant_id: &str) -> Event {
    Event {
        event_id: memoryd_core::generate_id(memoryd_core::EVENT_PREFIX),
        tenant_id: tenant_id.into(),
        session_id: "sess_1".into(),
        channel: Channel::Private,
        actor: Actor {
            actor_type: ActorType::Agent,
            id: "agent_1".into(),
        },
        kind: EventKind::Message,
        sensitivity: Sensitivity::Low,
        tags: vec![],
        content: serde_json::json!({"text": "hello"}),
        refs: vec![],
        labels: ScopeLabels {
            scope: Some("session".into()),
            subject_type: None,
            subject_id: None,
            project_id: None,
        },
        ts: Utc::now(),
    }
}

#[tokio::test]
#[ignore]
async fn event_round_trips_through_insert_and_get() -> Result<()> {
    let db = TestDb::new().await?;
    let event = test_event(&db.tenant_id);
    memoryd_store::insert_event(&db.pool, &event).await?;
    let loaded = memoryd_store::get_event(&db.pool, &db.tenant_id, &event.event_id).await?;
    assert_eq!(loaded.event_id, event.event_id);
    assert_eq!(loaded.channel, Channel::Private);
    assert_eq!(loaded.actor.actor_type, ActorType::Agent);
    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn list_chunks_by_tenant_returns_inserted_chunk() -> Result<()> {
    // The tokenized full-text match itself lives in `memoryd-overlay`,
    // which runs it against `effective_text` after folding approved edits
    // over every chunk this lists — not against a store-level FTS
    // primitive, since an `amend` can replace a chunk's stored text
    // entirely (see `memoryd-overlay::search_chunks`).
    let db = TestDb::new().await?;
    let event = test_event(&db.tenant_id);
    memoryd_store::insert_event(&db.pool, &event).await?;

    let chunk = Chunk {
        chunk_id: memoryd_core::generate_id(memoryd_core::CHUNK_PREFIX),
        tenant_id: db.tenant_id.clone(),
        event_id: event.event_id.clone(),
        ts: Utc::now(),
        kind: EventKind::Message,
        channel: Channel::Private,
        sensitivity: Sensitivity::Low,
        tags: vec![],
        token_est: 3,
        importance: 0.0,
        text: "the quick brown fox".into(),
        labels: event.labels.clone(),
    };
    memoryd_store::insert_chunk(&db.pool, &chunk).await?;

    let all = memoryd_store::list_chunks_by_tenant(&db.pool, &db.tenant_id).await?;
    assert!(all.iter().any(|c| c.chunk_id == chunk.chunk_id && c.text == chunk.text));

    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn task_status_update_persists() -> Result<()> {
    let db = TestDb::new().await?;
    let task = Task {
        task_id: memoryd_core::generate_id(memoryd_core::TASK_PREFIX),
        tenant_id: db.tenant_id.clone(),
        title: "ship it".into(),
        details: None,
        status: TaskStatus::Open,
        ts: Utc::now(),
    };
    memoryd_store::insert_task(&db.pool, &task).await?;
    memoryd_store::update_task_status(&db.pool, &db.tenant_id, &task.task_id, TaskStatus::Doing)
        .await?;
    let loaded = memoryd_store::get_task(&db.pool, &db.tenant_id, &task.task_id).await?;
    assert_eq!(loaded.status, TaskStatus::Doing);
    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn decision_listing_filters_by_status() -> Result<()> {
    let db = TestDb::new().await?;
    let decision = Decision {
        decision_id: memoryd_core::generate_id(memoryd_core::DECISION_PREFIX),
        tenant_id: db.tenant_id.clone(),
        ts: Utc::now(),
        decision: "use postgres".into(),
        rationale: vec!["fts built in".into()],
        status: DecisionStatus::Active,
        refs: vec![],
        labels: ScopeLabels {
            scope: Some("project".into()),
            subject_type: None,
            subject_id: None,
            project_id: Some("proj_1".into()),
        },
    };
    memoryd_store::insert_decision(&db.pool, &decision).await?;
    let active =
        memoryd_store::list_decisions_by_status(&db.pool, &db.tenant_id, DecisionStatus::Active)
            .await?;
    assert!(active.iter().any(|d| d.decision_id == decision.decision_id));
    let revoked =
        memoryd_store::list_decisions_by_status(&db.pool, &db.tenant_id, DecisionStatus::Revoked)
            .await?;
    assert!(!revoked.iter().any(|d| d.decision_id == decision.decision_id));
    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn rule_listing_orders_by_priority_descending() -> Result<()> {
    let db = TestDb::new().await?;
    let low = Rule {
        rule_id: memoryd_core::generate_id(memoryd_core::RULE_PREFIX),
        tenant_id: db.tenant_id.clone(),
        content: "be polite".into(),
        scope: None,
        channel: "all".into(),
        priority: 1,
        token_est: 3,
    };
    let high = Rule {
        rule_id: memoryd_core::generate_id(memoryd_core::RULE_PREFIX),
        tenant_id: db.tenant_id.clone(),
        content: "never leak secrets".into(),
        scope: None,
        channel: "all".into(),
        priority: 100,
        token_est: 3,
    };
    memoryd_store::insert_rule(&db.pool, &low).await?;
    memoryd_store::insert_rule(&db.pool, &high).await?;
    let rules = memoryd_store::list_rules(&db.pool, &db.tenant_id).await?;
    assert_eq!(rules[0].rule_id, high.rule_id);
    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn approved_edit_is_listed_but_proposed_is_not() -> Result<()> {
    let db = TestDb::new().await?;
    let event = test_event(&db.tenant_id);
    memoryd_store::insert_event(&db.pool, &event).await?;
    let chunk_id = memoryd_core::generate_id(memoryd_core::CHUNK_PREFIX);
    let chunk = Chunk {
        chunk_id: chunk_id.clone(),
        tenant_id: db.tenant_id.clone(),
        event_id: event.event_id.clone(),
        ts: Utc::now(),
        kind: EventKind::Message,
        channel: Channel::Private,
        sensitivity: Sensitivity::Low,
        tags: vec![],
        token_est: 3,
        importance: 0.0,
        text: "John Smith called".into(),
        labels: event.labels.clone(),
    };
    memoryd_store::insert_chunk(&db.pool, &chunk).await?;

    let approved = MemoryEdit {
        edit_id: memoryd_core::generate_id(memoryd_core::EDIT_PREFIX),
        tenant_id: db.tenant_id.clone(),
        target_type: EditTargetType::Chunk,
        target_id: chunk_id.clone(),
        op: EditOp::Amend,
        patch: serde_json::json!({"text": "Jane Smith called"}),
        reason: Some("correction".into()),
        proposed_by: "agent_1".into(),
        status: EditStatus::Approved,
        created_at: Utc::now(),
        applied_at: Some(Utc::now()),
    };
    let proposed = MemoryEdit {
        edit_id: memoryd_core::generate_id(memoryd_core::EDIT_PREFIX),
        status: EditStatus::Proposed,
        applied_at: None,
        ..approved.clone()
    };
    memoryd_store::insert_edit(&db.pool, &approved).await?;
    memoryd_store::insert_edit(&db.pool, &proposed).await?;

    let listed = memoryd_store::list_approved_edits_for_target(
        &db.pool,
        &db.tenant_id,
        EditTargetType::Chunk,
        &chunk_id,
    )
    .await?;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].edit_id, approved.edit_id);
    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn capsule_visible_to_audience_member_only() -> Result<()> {
    let db = TestDb::new().await?;
    let now = Utc::now();
    let capsule = Capsule {
        capsule_id: memoryd_core::generate_id(memoryd_core::CAPSULE_PREFIX),
        tenant_id: db.tenant_id.clone(),
        scope: CapsuleScope::Session.as_str().into(),
        subject_type: None,
        subject_id: None,
        author_agent_id: "author_agent".into(),
        audience_agent_ids: ["peer_agent".to_string()].into_iter().collect(),
        items: CapsuleItems::default(),
        risks: vec![],
        ttl_days: 7,
        status: CapsuleStatus::Active,
        created_at: now,
        expires_at: Capsule::expires_at_from(now, 7),
    };
    memoryd_store::insert_capsule(&db.pool, &capsule).await?;
    let loaded =
        memoryd_store::get_capsule(&db.pool, &db.tenant_id, &capsule.capsule_id).await?;
    assert!(loaded.is_visible_to("peer_agent"));
    assert!(!loaded.is_visible_to("stranger_agent"));
    db.cleanup().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn edge_listing_by_type_finds_depends_on() -> Result<()> {
    let db = TestDb::new().await?;
    let edge = Edge {
        edge_id: memoryd_core::generate_id(memoryd_core::EDGE_PREFIX),
        tenant_id: db.tenant_id.clone(),
        from_node_id: "tsk_a".into(),
        to_node_id: "tsk_b".into(),
        edge_type: memoryd_model::DEPENDS_ON.into(),
        properties: Default::default(),
        created_at: Utc::now(),
    };
    memoryd_store::insert_edge(&db.pool, &edge).await?;
    let edges =
        memoryd_store::list_edges_by_type(&db.pool, &db.tenant_id, memoryd_model::DEPENDS_ON)
            .await?;
    assert!(edges.iter().any(|e| e.edge_id == edge.edge_id));
    db.cleanup().await;
    Ok(())
}
