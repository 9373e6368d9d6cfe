//! SQLite implementation of GuildSettingsRepository

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::instrument;

use nexus_core::entities::GuildSettings;
use nexus_core::traits::{GuildSettingsRepository, RepoResult};
use nexus_core::value_objects::{Prefix, Snowflake};

use crate::mappers::{encode_roles, prefix_or_default};
use crate::models::GuildSettingsModel;

use super::error::map_db_error;

/// SQLite implementation of GuildSettingsRepository
#[derive(Clone)]
pub struct SqliteGuildSettingsRepository {
    pool: SqlitePool,
}

impl SqliteGuildSettingsRepository {
    /// Create a new SqliteGuildSettingsRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuildSettingsRepository for SqliteGuildSettingsRepository {
    #[instrument(skip(self))]
    async fn get_prefix(&self, guild_id: Snowflake) -> RepoResult<Prefix> {
        let stored = sqlx::query_scalar::<_, Option<String>>(
            r"
            SELECT prefix FROM guild_settings WHERE guild_id = ?1
            ",
        )
        .bind(guild_id.to_db())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(prefix_or_default(stored.flatten()))
    }

    #[instrument(skip(self))]
    async fn set_prefix(&self, guild_id: Snowflake, prefix: &Prefix) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO guild_settings (guild_id, prefix)
            VALUES (?1, ?2)
            ON CONFLICT (guild_id) DO UPDATE SET prefix = excluded.prefix
            ",
        )
        .bind(guild_id.to_db())
        .bind(prefix.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Option<GuildSettings>> {
        let result = sqlx::query_as::<_, GuildSettingsModel>(
            r"
            SELECT guild_id, prefix, authorized_roles, logging_channel
            FROM guild_settings
            WHERE guild_id = ?1
            ",
        )
        .bind(guild_id.to_db())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(GuildSettings::from))
    }

    #[instrument(skip(self))]
    async fn set_logging_channel(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO guild_settings (guild_id, logging_channel)
            VALUES (?1, ?2)
            ON CONFLICT (guild_id) DO UPDATE SET logging_channel = excluded.logging_channel
            ",
        )
        .bind(guild_id.to_db())
        .bind(channel_id.map(Snowflake::to_db))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_authorized_roles(
        &self,
        guild_id: Snowflake,
        role_ids: &BTreeSet<Snowflake>,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO guild_settings (guild_id, authorized_roles)
            VALUES (?1, ?2)
            ON CONFLICT (guild_id) DO UPDATE SET authorized_roles = excluded.authorized_roles
            ",
        )
        .bind(guild_id.to_db())
        .bind(encode_roles(role_ids))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
