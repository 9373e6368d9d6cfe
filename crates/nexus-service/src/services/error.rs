//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use nexus_core::DomainError;
use std::fmt;

/// Reply text for failures the user cannot act on
pub const GENERIC_FAILURE: &str = "Internal registry unavailable. The incident has been logged.";

/// Service layer error type
#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation, missing permission or storage failure
    Domain(DomainError),

    /// Invalid command input
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Get the error code for logs
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Whether the text is safe and useful to show in chat
    pub fn is_user_facing(&self) -> bool {
        match self {
            Self::Domain(e) => e.is_validation() || e.is_authorization(),
            Self::Validation(_) => true,
        }
    }

    /// Text to reply with in the channel the command came from
    pub fn user_message(&self) -> String {
        match self {
            Self::Domain(DomainError::InvalidArgument(msg)) | Self::Validation(msg) => msg.clone(),
            Self::Domain(DomainError::MissingPermission(permission)) => {
                format!("Missing permissions: {permission}")
            }
            Self::Domain(DomainError::StorageUnavailable(_)) => GENERIC_FAILURE.to_string(),
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
