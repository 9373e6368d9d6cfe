//! Request DTOs for command arguments
//!
//! Parsed from raw command text, then checked with `Validate`.

use validator::{Validate, ValidationErrors};

use crate::services::{ServiceError, ServiceResult};

/// Messages purged when `secure_clear` is called without an amount
pub const DEFAULT_PURGE_AMOUNT: i64 = 10;

/// Upper bound on a single purge
pub const MAX_PURGE_AMOUNT: i64 = 1000;

// ============================================================================
// Moderation Requests
// ============================================================================

/// Purge request for `secure_clear`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Validate)]
pub struct PurgeRequest {
    #[validate(range(min = 1, max = 1000, message = "Amount must be between 1 and 1000."))]
    pub amount: i64,
}

impl Default for PurgeRequest {
    fn default() -> Self {
        Self {
            amount: DEFAULT_PURGE_AMOUNT,
        }
    }
}

impl PurgeRequest {
    /// Build from the optional first command argument
    pub fn from_arg(arg: Option<&str>) -> ServiceResult<Self> {
        let request = match arg {
            None => Self::default(),
            Some(raw) => Self {
                amount: raw
                    .trim()
                    .parse()
                    .map_err(|_| ServiceError::validation("Amount must be a whole number."))?,
            },
        };

        request
            .validate()
            .map_err(|e| ServiceError::validation(first_message(&e)))?;

        Ok(request)
    }

    /// Validated amount as a message count
    pub fn count(&self) -> usize {
        self.amount as usize
    }
}

/// First human-readable message out of a validation failure
fn first_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Invalid input.".to_string())
}
