//! SQLite implementation of SecurityLogRepository

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use nexus_core::entities::{NewSecurityLogEntry, SecurityLogEntry};
use nexus_core::traits::{RepoResult, SecurityLogRepository};
use nexus_core::value_objects::Snowflake;

use crate::mappers::SecurityLogInsert;
use crate::models::SecurityLogModel;

use super::error::map_db_error;

/// SQLite implementation of SecurityLogRepository
#[derive(Clone)]
pub struct SqliteSecurityLogRepository {
    pool: SqlitePool,
}

impl SqliteSecurityLogRepository {
    /// Create a new SqliteSecurityLogRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SecurityLogRepository for SqliteSecurityLogRepository {
    #[instrument(skip(self, entry), fields(target_id = %entry.target_id, action = %entry.action))]
    async fn append(&self, entry: &NewSecurityLogEntry) -> RepoResult<SecurityLogEntry> {
        let insert = SecurityLogInsert::new(entry);

        let result = sqlx::query(
            r"
            INSERT INTO security_logs (target_id, action, executor_id, timestamp)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(insert.target_id)
        .bind(insert.action)
        .bind(insert.executor_id)
        .bind(insert.timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(entry.clone().into_stored(result.last_insert_rowid()))
    }

    #[instrument(skip(self))]
    async fn recent_for_target(
        &self,
        target_id: Snowflake,
        limit: u32,
    ) -> RepoResult<Vec<SecurityLogEntry>> {
        let results = sqlx::query_as::<_, SecurityLogModel>(
            r"
            SELECT id, target_id, action, executor_id, timestamp
            FROM security_logs
            WHERE target_id = ?1
            ORDER BY id DESC
            LIMIT ?2
            ",
        )
        .bind(target_id.to_db())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(SecurityLogEntry::from).collect())
    }
}
