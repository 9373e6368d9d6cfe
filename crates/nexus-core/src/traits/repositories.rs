//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::entities::{GuildSettings, NewSecurityLogEntry, SecurityLogEntry};
use crate::error::DomainError;
use crate::value_objects::{Prefix, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Guild Settings Repository
// ============================================================================

/// Every setter is a column-scoped upsert: it creates the row when missing and
/// never touches the other columns of an existing row.
#[async_trait]
pub trait GuildSettingsRepository: Send + Sync {
    /// Stored prefix, or the default prefix when the guild has none
    async fn get_prefix(&self, guild_id: Snowflake) -> RepoResult<Prefix>;

    /// Store a new prefix
    async fn set_prefix(&self, guild_id: Snowflake, prefix: &Prefix) -> RepoResult<()>;

    /// Full settings row, or `None` if the guild never stored anything
    async fn find_by_guild(&self, guild_id: Snowflake) -> RepoResult<Option<GuildSettings>>;

    /// Set or clear the logging channel
    async fn set_logging_channel(
        &self,
        guild_id: Snowflake,
        channel_id: Option<Snowflake>,
    ) -> RepoResult<()>;

    /// Replace the authorized role set
    async fn set_authorized_roles(
        &self,
        guild_id: Snowflake,
        role_ids: &BTreeSet<Snowflake>,
    ) -> RepoResult<()>;
}

// ============================================================================
// Security Log Repository
// ============================================================================

#[async_trait]
pub trait SecurityLogRepository: Send + Sync {
    /// Append an entry and return it with its assigned id
    async fn append(&self, entry: &NewSecurityLogEntry) -> RepoResult<SecurityLogEntry>;

    /// Newest entries for a target, newest first
    async fn recent_for_target(
        &self,
        target_id: Snowflake,
        limit: u32,
    ) -> RepoResult<Vec<SecurityLogEntry>>;
}
