//! SQLite repository implementations
//!
//! This module contains SQLite implementations of all repository traits
//! defined in nexus-core.

pub mod error;
mod guild_settings;
mod security_log;

pub use guild_settings::SqliteGuildSettingsRepository;
pub use security_log::SqliteSecurityLogRepository;
