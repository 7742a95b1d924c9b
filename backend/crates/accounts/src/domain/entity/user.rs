//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::value_object::{email::Email, user_name::UserName};

/// User entity
///
/// A full user profile including the stored credential hash. The hash is
/// never serialized out of the crate; the presentation layer maps entities
/// into DTOs that omit it.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier, immutable
    pub user_id: UserId,
    /// User name (unique, usable as a login identity)
    pub user_name: UserName,
    /// Email address (unique, usable as a login identity)
    pub email: Email,
    /// Argon2id hash of the password
    pub password_hash: HashedPassword,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Age in years
    pub age: i16,
    /// Whether the account may log in
    pub is_active: bool,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user
    pub fn new(
        user_name: UserName,
        email: Email,
        password_hash: HashedPassword,
        first_name: String,
        last_name: String,
        age: i16,
    ) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            first_name,
            last_name,
            age,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the user can log in
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Update user name
    pub fn set_user_name(&mut self, user_name: UserName) {
        self.user_name = user_name;
        self.updated_at = Utc::now();
    }

    /// Update email
    pub fn set_email(&mut self, email: Email) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update profile fields
    pub fn set_profile(&mut self, first_name: Option<String>, last_name: Option<String>, age: Option<i16>) {
        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(age) = age {
            self.age = age;
        }
        self.updated_at = Utc::now();
    }

    /// Activate or deactivate the account
    pub fn set_active(&mut self, is_active: bool) {
        self.is_active = is_active;
        self.updated_at = Utc::now();
    }
}
