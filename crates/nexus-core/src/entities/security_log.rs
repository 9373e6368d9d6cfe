//! Security log entities - append-only audit records

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::Snowflake;

/// A stored audit record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityLogEntry {
    /// Assigned by the store, strictly increasing
    pub id: i64,
    pub target_id: Snowflake,
    pub executor_id: Snowflake,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

/// An audit record that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSecurityLogEntry {
    pub target_id: Snowflake,
    pub executor_id: Snowflake,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl NewSecurityLogEntry {
    /// Create a record stamped with the current time
    pub fn new(target_id: Snowflake, executor_id: Snowflake, action: impl Into<String>) -> Self {
        Self {
            target_id,
            executor_id,
            action: action.into(),
            timestamp: Utc::now(),
        }
    }

    /// Attach the id the store assigned
    pub fn into_stored(self, id: i64) -> SecurityLogEntry {
        SecurityLogEntry {
            id,
            target_id: self.target_id,
            executor_id: self.executor_id,
            action: self.action,
            timestamp: self.timestamp,
        }
    }
}
