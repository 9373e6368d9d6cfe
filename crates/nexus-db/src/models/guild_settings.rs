//! Guild settings database model

use sqlx::FromRow;

/// Database model for guild_settings table
///
/// Every column except the key is nullable: rows written by older releases
/// replaced the whole row and left the untouched columns NULL.
#[derive(Debug, Clone, FromRow)]
pub struct GuildSettingsModel {
    pub guild_id: i64,
    pub prefix: Option<String>,
    /// JSON array of role ids as decimal strings
    pub authorized_roles: Option<String>,
    pub logging_channel: Option<i64>,
}
