//! Guild settings entity <-> model mapper
//!
//! Reads are tolerant: a stored value that no longer passes validation falls
//! back to the default instead of failing every message in that guild.

use std::collections::BTreeSet;

use nexus_core::entities::GuildSettings;
use nexus_core::value_objects::{Prefix, Snowflake};

use crate::models::GuildSettingsModel;

/// Turn a nullable prefix column into a usable prefix
pub fn prefix_or_default(raw: Option<String>) -> Prefix {
    match raw {
        Some(raw) => Prefix::parse(raw.clone()).unwrap_or_else(|_| {
            tracing::warn!(stored = %raw, "Ignoring invalid stored prefix");
            Prefix::default()
        }),
        None => Prefix::default(),
    }
}

/// Serialize a role set for the authorized_roles column
///
/// An empty set is stored as NULL.
pub fn encode_roles(role_ids: &BTreeSet<Snowflake>) -> Option<String> {
    if role_ids.is_empty() {
        return None;
    }
    let ids: Vec<String> = role_ids.iter().map(ToString::to_string).collect();
    serde_json::to_string(&ids).ok()
}

/// Parse the authorized_roles column
pub fn decode_roles(raw: &str) -> Result<BTreeSet<Snowflake>, serde_json::Error> {
    serde_json::from_str::<Vec<Snowflake>>(raw).map(|ids| ids.into_iter().collect())
}

/// Convert GuildSettingsModel to GuildSettings entity
impl From<GuildSettingsModel> for GuildSettings {
    fn from(model: GuildSettingsModel) -> Self {
        let guild_id = Snowflake::from_db(model.guild_id);

        let authorized_roles = match model.authorized_roles.as_deref() {
            Some(raw) => decode_roles(raw).unwrap_or_else(|e| {
                tracing::warn!(guild_id = %guild_id, error = %e, "Ignoring unreadable authorized_roles");
                BTreeSet::new()
            }),
            None => BTreeSet::new(),
        };

        GuildSettings {
            guild_id,
            prefix: prefix_or_default(model.prefix),
            authorized_roles,
            logging_channel_id: model.logging_channel.map(Snowflake::from_db),
        }
    }
}
