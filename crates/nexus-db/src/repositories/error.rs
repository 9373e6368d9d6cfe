//! Error handling utilities for repositories

use nexus_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
///
/// Any failure of the embedded store (open, read, write, lock, corruption)
/// surfaces as `StorageUnavailable`; nothing here is retried.
pub fn map_db_error(e: SqlxError) -> DomainError {
    tracing::error!(error = %e, "Store operation failed");
    DomainError::StorageUnavailable(e.to_string())
}
