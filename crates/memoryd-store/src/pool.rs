// SPDX-License-Identifier: Apache-2.0
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::StoreResult;

/// Open a connection pool against `dsn`, capped at `pool_size` connections,
/// with `statement_timeout_secs` applied as the server-side `statement_timeout`
/// on every acquired connection.
pub async fn connect(dsn: &str, pool_size: u32, statement_timeout_secs: u64) -> StoreResult<PgPool> {
    let timeout_ms = statement_timeout_secs * 1000;
    let pool = PgPoolOptions::new()
        .max_connections(pool_size)
        .acquire_timeout(Duration::from_secs(10))
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                sqlx::query(&format!("SET statement_timeout = {timeout_ms}"))
                    .execute(conn)
                    .await?;
                Ok(())
            })
        })
        .connect(dsn)
        .await?;
    Ok(pool)
}

/// Apply every migration under `migrations/` that hasn't run yet.
pub async fn migrate(pool: &PgPool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
