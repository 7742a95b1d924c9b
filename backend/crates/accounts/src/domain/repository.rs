//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::{ban::BanRecord, login_attempt::LoginAttempt, user::User};
use crate::domain::value_object::{email::Email, user_name::UserName};
use crate::error::AccountsResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AccountsResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AccountsResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AccountsResult<Option<User>>;

    /// Find user by login identity (matches user name or email)
    async fn find_by_identity(&self, identity: &str) -> AccountsResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AccountsResult<bool>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AccountsResult<bool>;

    /// List users, newest first
    async fn list(&self, limit: i64, offset: i64) -> AccountsResult<Vec<User>>;

    /// Count all users
    async fn count(&self) -> AccountsResult<i64>;

    /// Update user
    async fn update(&self, user: &User) -> AccountsResult<()>;

    /// Delete user, returning the number of rows removed
    async fn delete(&self, user_id: &UserId) -> AccountsResult<u64>;
}

/// Attempt ledger trait
///
/// Append-only; entries are never mutated or deleted.
#[trait_variant::make(LoginAttemptRepository: Send)]
pub trait LocalLoginAttemptRepository {
    /// Append one attempt
    async fn record(&self, attempt: &LoginAttempt) -> AccountsResult<()>;

    /// All failed attempts where the identity OR the origin matches and
    /// `attempted_at > since`
    ///
    /// The OR semantics make one origin rotating identities and many
    /// origins hammering one identity accumulate toward the same threshold.
    async fn failed_since(
        &self,
        identity: &str,
        origin: &str,
        since: DateTime<Utc>,
    ) -> AccountsResult<Vec<LoginAttempt>>;
}

/// Ban registry trait
#[trait_variant::make(BanRepository: Send)]
pub trait LocalBanRepository {
    /// Insert a ban unconditionally
    ///
    /// Concurrent duplicate bans for the same pair are tolerated; each is
    /// independently valid and any one of them short-circuits future logins.
    async fn create(&self, ban: &BanRecord) -> AccountsResult<()>;

    /// The most relevant non-expired ban whose identity OR origin matches
    async fn find_active(
        &self,
        identity: &str,
        origin: &str,
        now: DateTime<Utc>,
    ) -> AccountsResult<Option<BanRecord>>;

    /// Remove bans with `expires_at <= now`, returning how many were removed
    ///
    /// Safe to run concurrently with reads, which filter by expiry anyway.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AccountsResult<u64>;
}
