//! Command prefix - the string a message must start with to be treated as a command

use serde::Serialize;
use std::fmt;
use validator::Validate;

use crate::error::DomainError;

/// Prefix used when a guild has never configured one
pub const DEFAULT_PREFIX: &str = "!";

/// Maximum prefix length in characters
pub const MAX_PREFIX_LEN: usize = 5;

#[derive(Validate)]
struct PrefixInput {
    #[validate(length(min = 1, max = 5))]
    value: String,
}

/// A validated command prefix (1 to 5 characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Prefix(String);

impl Prefix {
    /// Validate a raw prefix string
    ///
    /// Length is counted in characters, not bytes.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let input = PrefixInput { value: raw.into() };

        if input.validate().is_err() {
            return Err(if input.value.is_empty() {
                DomainError::InvalidArgument("Prefix cannot be empty.".to_string())
            } else {
                DomainError::InvalidArgument("Prefix too long.".to_string())
            });
        }

        Ok(Self(input.value))
    }

    /// The prefix every guild starts with
    pub fn default_prefix() -> Self {
        Self(DEFAULT_PREFIX.to_string())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for Prefix {
    fn default() -> Self {
        Self::default_prefix()
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Prefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Prefix {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
