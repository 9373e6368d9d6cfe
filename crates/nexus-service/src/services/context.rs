//! Service context - dependency container for services
//!
//! Holds the repositories and the prefix cache.

use std::sync::Arc;

use nexus_cache::PrefixCache;
use nexus_core::traits::{GuildSettingsRepository, SecurityLogRepository};
use nexus_db::{SqliteGuildSettingsRepository, SqlitePool, SqliteSecurityLogRepository};
use tokio::sync::Mutex;

/// Service context containing all dependencies
///
/// Cheap to clone; every clone shares the same cache and repositories.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    settings_repo: Arc<dyn GuildSettingsRepository>,
    security_log_repo: Arc<dyn SecurityLogRepository>,

    // Cache
    prefix_cache: Arc<PrefixCache>,

    /// Serializes read-modify-write updates of authorized role sets
    role_edits: Arc<Mutex<()>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        settings_repo: Arc<dyn GuildSettingsRepository>,
        security_log_repo: Arc<dyn SecurityLogRepository>,
        prefix_cache: Arc<PrefixCache>,
    ) -> Self {
        Self {
            settings_repo,
            security_log_repo,
            prefix_cache,
            role_edits: Arc::new(Mutex::new(())),
        }
    }

    /// Wire the SQLite repositories and a fresh cache over one pool
    pub fn sqlite(pool: SqlitePool) -> Self {
        let settings_repo: Arc<dyn GuildSettingsRepository> =
            Arc::new(SqliteGuildSettingsRepository::new(pool.clone()));
        let security_log_repo: Arc<dyn SecurityLogRepository> =
            Arc::new(SqliteSecurityLogRepository::new(pool));
        let prefix_cache = Arc::new(PrefixCache::new(Arc::clone(&settings_repo)));

        Self::new(settings_repo, security_log_repo, prefix_cache)
    }

    // === Repositories ===

    /// Get the guild settings repository
    pub fn settings_repo(&self) -> &dyn GuildSettingsRepository {
        self.settings_repo.as_ref()
    }

    /// Get the security log repository
    pub fn security_log_repo(&self) -> &dyn SecurityLogRepository {
        self.security_log_repo.as_ref()
    }

    // === Cache ===

    /// Get the prefix cache
    pub fn prefix_cache(&self) -> &PrefixCache {
        self.prefix_cache.as_ref()
    }

    pub(crate) fn role_edits(&self) -> &Mutex<()> {
        self.role_edits.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("prefix_cache", &self.prefix_cache)
            .finish()
    }
}
