//! Ban Policy
//!
//! Pure decision logic for issuing temporary bans after repeated login
//! failures. Stateless between calls: the policy is evaluated once per
//! failed attempt against the current window contents, so concurrent
//! failing requests may each independently cross the threshold and each
//! issue a ban. The registry tolerates such duplicates.

use chrono::{DateTime, Duration, Utc};

use crate::domain::entity::{ban::BanRecord, login_attempt::LoginAttempt};

/// Reason recorded on bans issued by this policy
pub const BAN_REASON: &str = "multiple failed login attempts";

/// Sliding-window ban policy
#[derive(Debug, Clone)]
pub struct BanPolicy {
    /// Failures within the window that trigger a ban
    pub threshold: usize,
    /// Trailing window over which failures are counted
    pub window: Duration,
    /// How long an issued ban lasts
    pub ban_duration: Duration,
}

impl Default for BanPolicy {
    fn default() -> Self {
        Self {
            threshold: 3,
            window: Duration::minutes(2),
            ban_duration: Duration::minutes(2),
        }
    }
}

impl BanPolicy {
    pub fn new(threshold: usize, window: Duration, ban_duration: Duration) -> Self {
        Self {
            threshold,
            window,
            ban_duration,
        }
    }

    /// Start of the trailing window ending at `now`
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.window
    }

    /// Decide whether the given window of failed attempts warrants a ban
    ///
    /// `failures` is expected to be the ledger's answer for
    /// `(identity OR origin, succeeded = false, attempted_at > window start)`,
    /// including the failure that triggered this evaluation.
    pub fn evaluate(
        &self,
        identity: &str,
        origin: &str,
        failures: &[LoginAttempt],
        now: DateTime<Utc>,
    ) -> Option<BanRecord> {
        if failures.len() >= self.threshold {
            Some(BanRecord::new(
                identity,
                origin,
                now,
                self.ban_duration,
                BAN_REASON,
            ))
        } else {
            None
        }
    }
}
