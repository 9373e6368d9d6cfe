//! Domain entities - core business objects

mod guild_settings;
mod security_log;

pub use guild_settings::GuildSettings;
pub use security_log::{NewSecurityLogEntry, SecurityLogEntry};
