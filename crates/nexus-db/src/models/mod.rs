//! Database models - SQLx-compatible structs for SQLite tables

mod guild_settings;
mod security_log;

pub use guild_settings::GuildSettingsModel;
pub use security_log::SecurityLogModel;
