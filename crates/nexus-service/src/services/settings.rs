//! Settings service
//!
//! Guild configuration: command prefix, logging channel and the roles allowed
//! to use the administrative command group.

use nexus_core::entities::GuildSettings;
use nexus_core::value_objects::{Prefix, Snowflake};
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Settings service
pub struct SettingsService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SettingsService<'a> {
    /// Create a new SettingsService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Prefix for a guild, served from the cache
    pub async fn resolve_prefix(&self, guild_id: Snowflake) -> ServiceResult<Prefix> {
        Ok(self.ctx.prefix_cache().resolve_prefix(guild_id).await?)
    }

    /// Validate, store and cache a new prefix
    #[instrument(skip(self))]
    pub async fn update_prefix(&self, guild_id: Snowflake, raw: &str) -> ServiceResult<Prefix> {
        let prefix = self.ctx.prefix_cache().update_prefix(guild_id, raw).await?;

        info!(guild_id = %guild_id, prefix = %prefix, "Prefix updated");
        Ok(prefix)
    }

    /// Current settings, with defaults for a guild that never stored any
    #[instrument(skip(self))]
    pub async fn settings(&self, guild_id: Snowflake) -> ServiceResult<GuildSettings> {
        Ok(self
            .ctx
            .settings_repo()
            .find_by_guild(guild_id)
            .await?
            .unwrap_or_else(|| GuildSettings::new(guild_id)))
    }

    /// Set or clear the channel that mirrors security events
    #[instrument(skip(self))]
    pub async fn set_logging_channel(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> ServiceResult<()> {
        self.ctx
            .settings_repo()
            .set_logging_channel(guild_id, channel_id)
            .await?;

        info!(guild_id = %guild_id, channel_id = ?channel_id, "Logging channel updated");
        Ok(())
    }

    /// Authorize a role; returns `false` if it already was
    #[instrument(skip(self))]
    pub async fn add_authorized_role(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<bool> {
        let _guard = self.ctx.role_edits().lock().await;

        let mut roles = self.settings(guild_id).await?.authorized_roles;
        if !roles.insert(role_id) {
            return Ok(false);
        }
        self.ctx
            .settings_repo()
            .set_authorized_roles(guild_id, &roles)
            .await?;

        info!(guild_id = %guild_id, role_id = %role_id, "Role authorized");
        Ok(true)
    }

    /// Revoke a role; returns `false` if it was not authorized
    #[instrument(skip(self))]
    pub async fn remove_authorized_role(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<bool> {
        let _guard = self.ctx.role_edits().lock().await;

        let mut roles = self.settings(guild_id).await?.authorized_roles;
        if !roles.remove(&role_id) {
            return Ok(false);
        }
        self.ctx
            .settings_repo()
            .set_authorized_roles(guild_id, &roles)
            .await?;

        info!(guild_id = %guild_id, role_id = %role_id, "Role revoked");
        Ok(true)
    }

    /// Whether any of a member's roles is authorized in the guild
    pub async fn is_authorized(
        &self,
        guild_id: Snowflake,
        role_ids: &[Snowflake],
    ) -> ServiceResult<bool> {
        if role_ids.is_empty() {
            return Ok(false);
        }
        Ok(self.settings(guild_id).await?.grants_any(role_ids))
    }
}
