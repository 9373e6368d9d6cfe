//! Mappers - convert between domain entities and database models

mod guild_settings;
mod security_log;

pub use guild_settings::{decode_roles, encode_roles, prefix_or_default};
pub use security_log::SecurityLogInsert;
