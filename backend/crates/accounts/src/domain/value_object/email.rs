//! Email Value Object
//!
//! Represents a validated email address.
//! Basic format validation only; deliverability is not checked here.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Maximum email length (per RFC 5321)
const EMAIL_MAX_LENGTH: usize = 254;

/// Email validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email cannot be empty")]
    Empty,

    #[error("Email must be at most {EMAIL_MAX_LENGTH} characters")]
    TooLong,

    #[error("Invalid email format")]
    InvalidFormat,
}

/// Email address value object
///
/// Stored lowercased so that lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> Result<Self, EmailError> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(EmailError::Empty);
        }

        if email.len() > EMAIL_MAX_LENGTH {
            return Err(EmailError::TooLong);
        }

        if !Self::is_valid_format(&email) {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(email))
    }

    /// Reconstruct from a stored value without re-validation
    pub fn from_db(email: String) -> Self {
        Self(email)
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Basic email format validation
    fn is_valid_format(email: &str) -> bool {
        // Must contain exactly one @
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() != 2 {
            return false;
        }

        let local = parts[0];
        let domain = parts[1];

        // Local part checks
        if local.is_empty() || local.len() > 64 {
            return false;
        }

        // Domain checks
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        // Domain shouldn't start or end with dot or hyphen
        if domain.starts_with('.') || domain.ends_with('.') {
            return false;
        }
        if domain.starts_with('-') || domain.ends_with('-') {
            return false;
        }

        true
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
