//! Audit service
//!
//! Records privileged actions in the append-only security log.

use nexus_core::entities::{NewSecurityLogEntry, SecurityLogEntry};
use nexus_core::value_objects::Snowflake;
use tracing::{info, instrument};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Audit service
pub struct AuditService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuditService<'a> {
    /// Create a new AuditService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Append an entry stamped with the current UTC time
    #[instrument(skip(self, action), fields(action = %action.as_ref()))]
    pub async fn record(
        &self,
        target_id: Snowflake,
        executor_id: Snowflake,
        action: impl AsRef<str>,
    ) -> ServiceResult<SecurityLogEntry> {
        let entry = NewSecurityLogEntry::new(target_id, executor_id, action.as_ref());
        let stored = self.ctx.security_log_repo().append(&entry).await?;

        info!(entry_id = stored.id, "Security event recorded");
        Ok(stored)
    }

    /// Newest entries recorded against a target
    pub async fn recent(
        &self,
        target_id: Snowflake,
        limit: u32,
    ) -> ServiceResult<Vec<SecurityLogEntry>> {
        Ok(self
            .ctx
            .security_log_repo()
            .recent_for_target(target_id, limit)
            .await?)
    }
}
