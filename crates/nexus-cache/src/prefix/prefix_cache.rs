//! Read-through, write-through cache of guild command prefixes.
//!
//! Each key maps to a shared [`OnceCell`]. A miss clones the cell out of the
//! map and initializes it from the store, so every caller that arrives while
//! the load is in flight awaits the same read. An update installs a fresh,
//! already-initialized cell; loads still running against the old cell finish
//! on a cell nobody will look up again.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, instrument};

use nexus_core::traits::{GuildSettingsRepository, RepoResult};
use nexus_core::value_objects::{Prefix, Snowflake};

/// Key prefix for guild prefix entries
pub const PREFIX_KEY_PREFIX: &str = "pref_";

/// Cache key for a guild's prefix (`pref_<guild_id>`)
#[must_use]
pub fn cache_key(guild_id: Snowflake) -> String {
    format!("{PREFIX_KEY_PREFIX}{guild_id}")
}

type Slot = Arc<OnceCell<Prefix>>;

/// Process-lifetime prefix cache in front of the guild settings store.
///
/// Entries never expire and are never evicted.
pub struct PrefixCache {
    store: Arc<dyn GuildSettingsRepository>,
    entries: DashMap<String, Slot>,
    /// Serializes updates per key so the cache ends on the last stored value
    write_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl PrefixCache {
    /// Create an empty cache backed by `store`
    pub fn new(store: Arc<dyn GuildSettingsRepository>) -> Self {
        Self {
            store,
            entries: DashMap::new(),
            write_locks: DashMap::new(),
        }
    }

    /// Resolve a guild's prefix, loading it from the store on a miss.
    ///
    /// A failed load caches nothing; the next call retries.
    #[instrument(skip(self), fields(key = %cache_key(guild_id)))]
    pub async fn resolve_prefix(&self, guild_id: Snowflake) -> RepoResult<Prefix> {
        let slot = self.slot(guild_id);

        if let Some(prefix) = slot.get() {
            return Ok(prefix.clone());
        }

        let prefix = slot
            .get_or_try_init(|| async {
                debug!("Prefix cache miss");
                self.store.get_prefix(guild_id).await
            })
            .await?;

        Ok(prefix.clone())
    }

    /// Validate and store a new prefix, then overwrite the cached value.
    ///
    /// Validation and storage errors leave both the store and the cache as
    /// they were.
    #[instrument(skip(self), fields(key = %cache_key(guild_id)))]
    pub async fn update_prefix(&self, guild_id: Snowflake, raw: &str) -> RepoResult<Prefix> {
        let prefix = Prefix::parse(raw)?;
        let key = cache_key(guild_id);

        let lock = self.write_locks.entry(key.clone()).or_default().clone();
        let _guard = lock.lock().await;

        self.store.set_prefix(guild_id, &prefix).await?;
        self.entries
            .insert(key, Arc::new(OnceCell::new_with(Some(prefix.clone()))));

        debug!(prefix = %prefix, "Prefix cache updated");
        Ok(prefix)
    }

    /// Number of guilds with a resolved prefix in memory
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    /// Whether no prefix has been resolved yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone the slot for a guild out of the map, creating it if absent.
    /// The map guard is released before any await.
    fn slot(&self, guild_id: Snowflake) -> Slot {
        self.entries.entry(cache_key(guild_id)).or_default().clone()
    }
}

impl std::fmt::Debug for PrefixCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}
