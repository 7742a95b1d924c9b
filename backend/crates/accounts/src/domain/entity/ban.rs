//! Ban Record Entity

use chrono::{DateTime, Duration, Utc};

/// A temporary ban on an identity/origin pair
///
/// A ban is active for `[banned_at, expires_at)`. Expired rows may linger
/// until the next sweep; lookups always filter by expiry, so a stale row
/// never produces an incorrect "banned" result.
#[derive(Debug, Clone)]
pub struct BanRecord {
    /// Identity the ban applies to
    pub identity: String,
    /// Network origin the ban applies to
    pub origin: String,
    /// When the ban was issued
    pub banned_at: DateTime<Utc>,
    /// When the ban lapses (strictly after `banned_at`)
    pub expires_at: DateTime<Utc>,
    /// Human-readable reason
    pub reason: String,
}

impl BanRecord {
    /// Issue a new ban lasting `duration` from `banned_at`
    pub fn new(
        identity: impl Into<String>,
        origin: impl Into<String>,
        banned_at: DateTime<Utc>,
        duration: Duration,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            identity: identity.into(),
            origin: origin.into(),
            banned_at,
            expires_at: banned_at + duration,
            reason: reason.into(),
        }
    }

    /// Check whether the ban is active at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
