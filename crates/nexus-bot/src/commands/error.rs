//! Command error types

use nexus_core::DomainError;
use nexus_service::{ServiceError, GENERIC_FAILURE};
use thiserror::Error;

use crate::platform::PlatformError;

/// Command error type
#[derive(Debug, Error)]
pub enum CommandError {
    /// Bad or missing arguments; the text is the reply
    #[error("{0}")]
    Usage(String),

    /// Service error (validation, permissions, storage)
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// Chat platform call failed
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Outbound probe failed; the text is the reply
    #[error("{0}")]
    Upstream(String),
}

impl From<DomainError> for CommandError {
    fn from(err: DomainError) -> Self {
        Self::Service(ServiceError::from(err))
    }
}

impl CommandError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Caller lacks the named permission
    pub fn missing_permission(permission: impl Into<String>) -> Self {
        Self::from(DomainError::missing_permission(permission))
    }

    /// Whether this is the caller's fault rather than ours
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Usage(_) | Self::Upstream(_) => true,
            Self::Service(e) => e.is_user_facing(),
            Self::Platform(_) => false,
        }
    }

    /// Text to reply with
    pub fn user_message(&self) -> String {
        match self {
            Self::Usage(msg) | Self::Upstream(msg) => msg.clone(),
            Self::Service(e) => e.user_message(),
            Self::Platform(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

/// Command result type
pub type CommandResult<T = ()> = Result<T, CommandError>;
