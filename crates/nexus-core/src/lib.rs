//! # nexus-core
//!
//! Domain layer containing guild settings, security log entries, value objects,
//! and the repository traits the storage layer implements.
//! This crate has zero dependencies on infrastructure (database, chat platform, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{GuildSettings, NewSecurityLogEntry, SecurityLogEntry};
pub use error::DomainError;
pub use traits::{GuildSettingsRepository, RepoResult, SecurityLogRepository};
pub use value_objects::{Prefix, Snowflake, SnowflakeParseError, DEFAULT_PREFIX, MAX_PREFIX_LEN};
