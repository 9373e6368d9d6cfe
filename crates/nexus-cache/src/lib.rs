//! # nexus-cache
//!
//! In-process caching layer for the hot path of every incoming message:
//! resolving the guild's command prefix.
//!
//! ## Features
//!
//! - **Read-through**: misses load from the [`GuildSettingsRepository`] and
//!   concurrent misses for one guild share a single store read
//! - **Write-through**: updates hit the store first, then replace the cached
//!   value, so a completed update is visible to every later read
//!
//! ## Example
//!
//! ```ignore
//! use nexus_cache::PrefixCache;
//!
//! let cache = PrefixCache::new(Arc::new(SqliteGuildSettingsRepository::new(pool)));
//!
//! let prefix = cache.resolve_prefix(guild_id).await?;
//! cache.update_prefix(guild_id, "?!").await?;
//! ```
//!
//! [`GuildSettingsRepository`]: nexus_core::GuildSettingsRepository

pub mod prefix;

pub use prefix::{cache_key, PrefixCache, PREFIX_KEY_PREFIX};
