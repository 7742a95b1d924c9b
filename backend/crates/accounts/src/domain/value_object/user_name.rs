//! User Name Value Object
//!
//! A user name is the public handle a user logs in and is displayed with.
//!
//! ## Invariants
//! - 3 to 30 characters after NFKC normalization
//! - ASCII letters, digits and `_` `.` `-` only
//! - At least one letter or digit
//! - Does not start or end with `.` or `-`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 30;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// User name validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username must be at least {USER_NAME_MIN_LENGTH} characters")]
    TooShort,

    #[error("Username must be at most {USER_NAME_MAX_LENGTH} characters")]
    TooLong,

    #[error("Username contains invalid characters")]
    InvalidCharacter,

    #[error("Username must contain at least one letter or digit")]
    NoAlphanumeric,

    #[error("Username cannot start or end with '.' or '-'")]
    InvalidBoundary,
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Create a new user name with validation
    ///
    /// Input is NFKC-normalized and trimmed before validation.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let normalized: String = raw.into().nfkc().collect();
        let name = normalized.trim();

        let char_count = name.chars().count();
        if char_count < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort);
        }
        if char_count > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong);
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c))
        {
            return Err(UserNameError::InvalidCharacter);
        }

        if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UserNameError::NoAlphanumeric);
        }

        let first = name.chars().next();
        let last = name.chars().last();
        if matches!(first, Some('.') | Some('-')) || matches!(last, Some('.') | Some('-')) {
            return Err(UserNameError::InvalidBoundary);
        }

        Ok(Self(name.to_string()))
    }

    /// Reconstruct from a stored value
    ///
    /// Stored values were validated on the way in; re-validate so schema
    /// drift surfaces loudly instead of leaking invalid names.
    pub fn from_db(raw: &str) -> Result<Self, UserNameError> {
        Self::new(raw)
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(UserName::new("alice").is_ok());
        assert!(UserName::new("alice_smith").is_ok());
        assert!(UserName::new("alice.smith-2").is_ok());
        assert!(UserName::new("a_1").is_ok());
    }

    #[test]
    fn test_too_short() {
        assert_eq!(UserName::new("ab"), Err(UserNameError::TooShort));
    }

    #[test]
    fn test_too_long() {
        let long = "a".repeat(USER_NAME_MAX_LENGTH + 1);
        assert_eq!(UserName::new(long), Err(UserNameError::TooLong));
    }

    #[test]
    fn test_invalid_characters() {
        assert_eq!(
            UserName::new("alice smith"),
            Err(UserNameError::InvalidCharacter)
        );
        assert_eq!(UserName::new("alice@"), Err(UserNameError::InvalidCharacter));
    }

    #[test]
    fn test_symbols_only() {
        assert_eq!(UserName::new("_._"), Err(UserNameError::NoAlphanumeric));
    }

    #[test]
    fn test_boundary() {
        assert_eq!(UserName::new(".alice"), Err(UserNameError::InvalidBoundary));
        assert_eq!(UserName::new("alice-"), Err(UserNameError::InvalidBoundary));
        assert!(UserName::new("_alice_").is_ok());
    }

    #[test]
    fn test_trims_whitespace() {
        let name = UserName::new("  alice  ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_serde_round_trip() {
        let name = UserName::new("alice_smith").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"alice_smith\"");

        let parsed: UserName = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, name);
    }
}
