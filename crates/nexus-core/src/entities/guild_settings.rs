//! Guild settings entity - per-guild bot configuration

use std::collections::BTreeSet;

use serde::Serialize;

use crate::value_objects::{Prefix, Snowflake};

/// Settings for one guild
///
/// A guild that never customised anything has no row; [`GuildSettings::new`]
/// gives the values such a guild behaves with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuildSettings {
    pub guild_id: Snowflake,
    pub prefix: Prefix,
    /// Roles allowed to use the administrative command group
    pub authorized_roles: BTreeSet<Snowflake>,
    /// Channel that receives copies of security events
    pub logging_channel_id: Option<Snowflake>,
}

impl GuildSettings {
    /// Settings of a guild that has not configured anything yet
    pub fn new(guild_id: Snowflake) -> Self {
        Self {
            guild_id,
            prefix: Prefix::default(),
            authorized_roles: BTreeSet::new(),
            logging_channel_id: None,
        }
    }

    /// Check whether any of the given roles is authorized
    pub fn grants_any(&self, role_ids: &[Snowflake]) -> bool {
        role_ids.iter().any(|id| self.authorized_roles.contains(id))
    }
}
