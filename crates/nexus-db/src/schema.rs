//! Schema creation
//!
//! Every statement is `IF NOT EXISTS`, so running this on each startup never
//! touches existing tables or rows.

use nexus_core::traits::RepoResult;
use sqlx::SqlitePool;
use tracing::instrument;

use crate::repositories::error::map_db_error;

const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS guild_settings (
        guild_id INTEGER PRIMARY KEY,
        prefix TEXT DEFAULT '!',
        authorized_roles TEXT,
        logging_channel INTEGER
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS security_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        target_id INTEGER,
        action TEXT,
        executor_id INTEGER,
        timestamp DATETIME
    )
    ",
    r"
    CREATE INDEX IF NOT EXISTS idx_security_logs_target
        ON security_logs (target_id, id)
    ",
];

/// Create both tables if they are absent
///
/// Fails with `StorageUnavailable` when the file cannot be opened or written.
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &SqlitePool) -> RepoResult<()> {
    let mut tx = pool.begin().await.map_err(map_db_error)?;

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
    }

    tx.commit().await.map_err(map_db_error)?;

    tracing::debug!("Schema verified");
    Ok(())
}
