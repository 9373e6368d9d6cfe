//! # nexus-db
//!
//! Persistent store implementing the repository traits with SQLite via SQLx.
//!
//! ## Overview
//!
//! This crate owns everything durable:
//!
//! - One long-lived connection pool per process
//! - Idempotent schema creation ([`ensure_schema`])
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nexus_db::{create_pool, ensure_schema, DatabaseConfig, SqliteGuildSettingsRepository};
//! use nexus_core::traits::GuildSettingsRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     ensure_schema(&pool).await?;
//!     let settings = SqliteGuildSettingsRepository::new(pool);
//!
//!     let prefix = settings.get_prefix(42.into()).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod schema;

// Re-export commonly used types
pub use pool::{create_memory_pool, create_pool, DatabaseConfig, SqlitePool};
pub use repositories::{SqliteGuildSettingsRepository, SqliteSecurityLogRepository};
pub use schema::ensure_schema;
