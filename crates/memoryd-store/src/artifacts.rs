// SPDX-License-Identifier: Apache-2.0
use memoryd_model::Artifact;
use sqlx::PgExecutor;

use crate::error::{StoreError, StoreResult};

#[derive(sqlx::FromRow)]
struct ArtifactRow {
    artifact_id: String,
    tenant_id: String,
    kind: String,
    bytes: Vec<u8>,
    meta: serde_json::Value,
    refs: serde_json::Value,
}

impl TryFrom<ArtifactRow> for Artifact {
    type Error = StoreError;

    fn try_from(row: ArtifactRow) -> Result<Self, Self::Error> {
        Ok(Artifact {
            artifact_id: row.artifact_id,
            tenant_id: row.tenant_id,
            kind: row.kind,
            bytes: row.bytes,
            meta: row.meta,
            refs: serde_json::from_value(row.refs)?,
        })
    }
}

pub async fn insert_artifact<'c>(
    executor: impl PgExecutor<'c>,
    artifact: &Artifact,
) -> StoreResult<()> {
    sqlx::query(
        "INSERT INTO artifacts (artifact_id, tenant_id, kind, bytes, meta, refs) \
         VALUES ($1,$2,$3,$4,$5,$6)",
    )
    .bind(&artifact.artifact_id)
    .bind(&artifact.tenant_id)
    .bind(&artifact.kind)
    .bind(&artifact.bytes)
    .bind(&artifact.meta)
    .bind(serde_json::to_value(&artifact.refs)?)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_artifact<'c>(
    executor: impl PgExecutor<'c>,
    tenant_id: &str,
    artifact_id: &str,
) -> StoreResult<Artifact> {
    let row: ArtifactRow =
        sqlx::query_as("SELECT * FROM artifacts WHERE tenant_id = $1 AND artifact_id = $2")
            .bind(tenant_id)
            .bind(artifact_id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("artifact {artifact_id}")))?;
    row.try_into()
}
