//! Security log entity <-> model mapper

use nexus_core::entities::{NewSecurityLogEntry, SecurityLogEntry};
use nexus_core::value_objects::Snowflake;

use crate::models::SecurityLogModel;

/// Convert SecurityLogModel to SecurityLogEntry entity
impl From<SecurityLogModel> for SecurityLogEntry {
    fn from(model: SecurityLogModel) -> Self {
        SecurityLogEntry {
            id: model.id,
            target_id: model.target_id.map(Snowflake::from_db).unwrap_or_default(),
            executor_id: model.executor_id.map(Snowflake::from_db).unwrap_or_default(),
            action: model.action.unwrap_or_default(),
            timestamp: model.timestamp.unwrap_or_default(),
        }
    }
}

/// Values bound when appending a security log entry
pub struct SecurityLogInsert<'a> {
    pub target_id: i64,
    pub action: &'a str,
    pub executor_id: i64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<'a> SecurityLogInsert<'a> {
    pub fn new(entry: &'a NewSecurityLogEntry) -> Self {
        Self {
            target_id: entry.target_id.to_db(),
            action: &entry.action,
            executor_id: entry.executor_id.to_db(),
            timestamp: entry.timestamp,
        }
    }
}
