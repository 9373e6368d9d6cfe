//! Security log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for security_logs table
#[derive(Debug, Clone, FromRow)]
pub struct SecurityLogModel {
    pub id: i64,
    pub target_id: Option<i64>,
    pub action: Option<String>,
    pub executor_id: Option<i64>,
    pub timestamp: Option<DateTime<Utc>>,
}
