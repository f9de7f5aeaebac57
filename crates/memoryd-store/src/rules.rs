// SPDX-License-Identifier: Apache-2.0
use memoryd_model::Rule;
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct RuleRow {
    rule_id: String,
    tenant_id: String,
    content: String,
    scope: Option<String>,
    channel: String,
    priority: i32,
    token_est: i32,
}

impl From<RuleRow> for Rule {
    fn from(row: RuleRow) -> Self {
        Rule {
            rule_id: row.rule_id,
            tenant_id: row.tenant_id,
            content: row.content,
            scope: row.scope,
            channel: row.channel,
            priority: row.priority,
            token_est: row.token_est,
        }
    }
}

pub async fn insert_rule<'c>(executor: impl PgExecutor<'c>, rule: &Rule) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO rules (rule_id, tenant_id, content, scope, channel, priority, token_est) \
         VALUES ($1,$2,$3,$4,$5,$6,$7)",
    )
    .bind(&rule.rule_id)
    .bind(&rule.tenant_id)
    .bind(&rule.content)
    .bind(&rule.scope)
    .bind(&rule.channel)
    .bind(rule.priority)
    .bind(rule.token_est)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_rule<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    rule_id: &str,
) -> StoreResult<Rule> {
    let row: RuleRow = sqlx::query_as("SELECT * FROM rules WHERE tenant_id = $1 AND rule_id = $2")
        .bind(tenant_id)
        .bind(rule_id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("rule {rule_id}")))?;
    Ok(row.into())
}

/// All rules for a tenant, highest priority first. Callers filter by
/// `Rule::applies_to_channel` for the requesting channel (§4.H step 3).
pub async fn list_rules<'c>(executor: impl PgExecutor<'c>, tenant_id: &str) -> StoreResult<Vec<Rule>> {
    let rows: Vec<RuleRow> =
        sqlx::query_as("SELECT * FROM rules WHERE tenant_id = $1 ORDER BY priority DESC")
            .bind(tenant_id)
            .fetch_all(executor)
            .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}
